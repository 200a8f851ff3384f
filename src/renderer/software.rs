//! ---------------------------------------------------------------------------
//! Classic software (CPU) grid raycaster
//!
//! * Fills an RGB byte frame-buffer, `width * height * 3` bytes.
//! * Wall pass first (one DDA ray per column, plus floor/ceiling), then the
//!   sprite pass, which reads the per-column depth left by the walls.
//! * Single-threaded; a frame always runs to completion.
//! ---------------------------------------------------------------------------

mod clickable;
mod frame;
mod renderer;
pub mod sort;
mod sprites;
pub mod walls;

pub use clickable::{ClickFlags, ClickRegistry, Clickable};
pub use frame::Frame;
pub use renderer::Software;
pub use walls::{HitSide, RayHit, cast_ray};
