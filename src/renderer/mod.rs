//! Rendering abstraction layer.
//!
//! *The rest of the program never touches a pixel buffer directly.*
//! It describes the frame as a [`Scene`] and hands it to a type that
//! implements [`Renderer`].
//!
//! * Back-ends own their frame-scoped scratch (pixels, depth, picking data).
//! * A helper blanket-impl [`RendererExt`] adds `render` so call-sites
//!   stay short.

pub use crate::world::pack;
use crate::world::{Argb, Camera, Level, TextureBank};

/// Channel delta added by [`ShadeStyle::Highlighted`].
pub const HIGHLIGHT_DELTA: u8 = 25;

/// One output pixel, R-G-B.
pub type Rgb = [u8; 3];

/// How a texel is tinted on its way into the frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShadeStyle {
    #[default]
    Normal,
    /// Half brightness; Y-side walls.
    Darkened,
    /// Brightened by [`HIGHLIGHT_DELTA`], saturating.
    Highlighted,
}

impl ShadeStyle {
    #[inline]
    pub fn apply(self, [r, g, b]: Rgb) -> Rgb {
        match self {
            Self::Normal => [r, g, b],
            Self::Darkened => [r / 2, g / 2, b / 2],
            Self::Highlighted => [
                r.saturating_add(HIGHLIGHT_DELTA),
                g.saturating_add(HIGHLIGHT_DELTA),
                b.saturating_add(HIGHLIGHT_DELTA),
            ],
        }
    }
}

/// Split a packed `0xAARRGGBB` texel into its colour channels.
#[inline]
pub fn unpack(c: Argb) -> Rgb {
    [(c >> 16) as u8, (c >> 8) as u8, c as u8]
}


/// Everything one frame reads.  Borrowed for the duration of the frame only;
/// the level and bank must not change while a frame is being cast.
#[derive(Clone, Copy)]
pub struct Scene<'a> {
    pub camera: &'a Camera,
    pub level: &'a Level,
    pub bank: &'a TextureBank,
    /// Sprite drawn with [`ShadeStyle::Highlighted`] (e.g. the one under
    /// the crosshair last frame).
    pub highlight: Option<usize>,
}

/// A renderer that owns an internal scratch buffer for the whole frame.
///
/// `end_frame` hands the finished buffer to a user-supplied closure.
pub trait Renderer {
    /// (Re)allocate internal scratch for the requested resolution and clear it.
    fn begin_frame(&mut self, width: usize, height: usize);

    /// Cast walls, floor, ceiling and sprites into the internal buffer.
    fn draw_scene(&mut self, scene: &Scene<'_>);

    /// Finish the frame and **loan** the finished RGB buffer to `submit`.
    ///
    /// * `submit(&[u8], w, h)` is run exactly once per frame; the slice holds
    ///   `w * h * 3` bytes, row-major.
    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[u8], usize, usize);
}

/// Convenience blanket-impl with a one-liner per-frame entry point.
pub trait RendererExt: Renderer {
    fn render<F>(&mut self, width: usize, height: usize, scene: &Scene<'_>, submit: F)
    where
        F: FnOnce(&[u8], usize, usize),
    {
        self.begin_frame(width, height);
        self.draw_scene(scene);
        self.end_frame(submit);
    }
}
impl<T: Renderer + ?Sized> RendererExt for T {}

pub mod present;
pub mod software;

pub use software::{ClickFlags, ClickRegistry, Clickable, Frame, Software};
