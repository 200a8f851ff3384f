use glam::DVec2;

use super::texture::TextureId;

/// Billboard placed in the level.  The renderer only reads these.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    pub pos: DVec2,
    pub texture: TextureId,
}

/// What a sprite texture depicts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteKind {
    Barrel,
    /// Ceiling fixture; cannot be shot.
    Light,
    Pillar,
    /// Any other texture id used as a sprite.
    Other,
}

impl SpriteKind {
    pub const BARREL_TEXTURE: TextureId = 11;
    pub const LIGHT_TEXTURE: TextureId = 12;
    pub const PILLAR_TEXTURE: TextureId = 13;

    pub fn from_texture(id: TextureId) -> Self {
        match id {
            Self::BARREL_TEXTURE => Self::Barrel,
            Self::LIGHT_TEXTURE => Self::Light,
            Self::PILLAR_TEXTURE => Self::Pillar,
            _ => Self::Other,
        }
    }

    #[inline]
    pub fn is_destructible(self) -> bool {
        self != Self::Light
    }
}

impl Sprite {
    pub fn new(x: f64, y: f64, texture: TextureId) -> Self {
        Self {
            pos: DVec2::new(x, y),
            texture,
        }
    }

    #[inline]
    pub fn kind(&self) -> SpriteKind {
        SpriteKind::from_texture(self.texture)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_lights_are_indestructible() {
        assert!(!Sprite::new(1.0, 1.0, 12).kind().is_destructible());
        assert!(Sprite::new(1.0, 1.0, 11).kind().is_destructible());
        assert!(Sprite::new(1.0, 1.0, 13).kind().is_destructible());
        assert_eq!(Sprite::new(0.0, 0.0, 3).kind(), SpriteKind::Other);
    }
}
