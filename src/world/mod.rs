pub mod camera;
pub mod grid;
pub mod level;
mod procedural;
pub mod sprite;
pub mod texture;

pub use camera::Camera;

pub use grid::{CEILING_TEXTURE, EMPTY, FLOOR_TEXTURE, Grid, is_wall_material};

pub use level::{Level, LevelError};

pub use sprite::{Sprite, SpriteKind};

pub use texture::{
    Argb, NO_TEXTURE, TEXTURE_SIZE, Texture, TextureBank, TextureError, TextureId, pack,
};
