use crate::{
    renderer::{Rgb, ShadeStyle, unpack},
    world::Argb,
};

/// RGB byte buffer the casters write into, `width * height * 3` bytes,
/// row-major.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Frame {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height * 3],
        }
    }

    /// Resize if the viewport changed, then clear to black.
    pub fn reset(&mut self, width: usize, height: usize) {
        if width != self.width || height != self.height {
            log::debug!("frame buffer {}×{} → {width}×{height}", self.width, self.height);
            self.width = width;
            self.height = height;
            self.pixels.resize(width * height * 3, 0);
        }
        self.pixels.fill(0);
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    #[inline]
    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        let (x, y) = (usize::try_from(x).ok()?, usize::try_from(y).ok()?);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y * self.width + x) * 3)
    }

    /// Write `color` tinted by `style`.  Writes outside the frame are dropped.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Argb, style: ShadeStyle) {
        let Some(at) = self.offset(x, y) else {
            return;
        };
        self.pixels[at..at + 3].copy_from_slice(&style.apply(unpack(color)));
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb> {
        let at = self.offset(x, y)?;
        Some([self.pixels[at], self.pixels[at + 1], self.pixels[at + 2]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::pack;

    #[test]
    fn styles_are_applied_on_write() {
        let mut f = Frame::new(4, 3);
        f.set_pixel(1, 2, pack(200, 100, 50), ShadeStyle::Darkened);
        f.set_pixel(3, 0, pack(200, 240, 10), ShadeStyle::Highlighted);
        f.set_pixel(0, 0, pack(9, 8, 7), ShadeStyle::Normal);
        assert_eq!(f.pixel(1, 2), Some([100, 50, 25]));
        assert_eq!(f.pixel(3, 0), Some([225, 255, 35]));
        assert_eq!(f.pixel(0, 0), Some([9, 8, 7]));
    }

    #[test]
    fn out_of_bounds_write_is_dropped() {
        let mut f = Frame::new(4, 3);
        let before = f.clone();
        f.set_pixel(4, 0, pack(255, 255, 255), ShadeStyle::Normal);
        f.set_pixel(0, 3, pack(255, 255, 255), ShadeStyle::Normal);
        f.set_pixel(-1, 1, pack(255, 255, 255), ShadeStyle::Normal);
        assert_eq!(f, before);
        assert_eq!(f.pixel(4, 0), None);
    }

    #[test]
    fn alpha_is_not_written() {
        let mut f = Frame::new(1, 1);
        f.set_pixel(0, 0, 0x00_102030, ShadeStyle::Normal);
        assert_eq!(f.as_bytes(), &[0x10, 0x20, 0x30]);
    }

    #[test]
    fn reset_resizes_and_clears() {
        let mut f = Frame::new(2, 2);
        f.set_pixel(1, 1, pack(1, 1, 1), ShadeStyle::Normal);
        f.reset(3, 1);
        assert_eq!(f.as_bytes().len(), 9);
        assert!(f.as_bytes().iter().all(|&b| b == 0));
    }
}
