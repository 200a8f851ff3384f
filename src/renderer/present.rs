//! Window-side overlays drawn on top of a finished frame.
//!
//! Window back-ends want one `0x00RRGGBB` word per pixel, so the RGB frame
//! is converted once into a [`Canvas`] and the HUD is drawn there.

use glam::{DVec2, Vec2};

use crate::{
    renderer::software::Clickable,
    world::{Camera, Grid, Sprite, is_wall_material},
};

pub const CROSSHAIR: u32 = 0x00FF_FFFF;
pub const CROSSHAIR_FIRING: u32 = 0x00FF_4020;
pub const OUTLINE: u32 = 0x00FF_FF00;
const MAP_WALL: u32 = 0x0080_8080;
const MAP_FLOOR: u32 = 0x0020_2020;
const MAP_SPRITE: u32 = 0x0000_C0FF;
const MAP_PLAYER: u32 = 0x0000_FF00;

#[derive(Default, Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl Canvas {
    /// Replace the canvas with `rgb` (`w * h * 3` bytes).
    pub fn load_rgb(&mut self, rgb: &[u8], w: usize, h: usize) {
        self.width = w;
        self.height = h;
        self.pixels.clear();
        self.pixels.extend(
            rgb.chunks_exact(3)
                .map(|p| (p[0] as u32) << 16 | (p[1] as u32) << 8 | p[2] as u32),
        );
        self.pixels.resize(w * h, 0);
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
    pub fn as_slice(&self) -> &[u32] {
        &self.pixels
    }

    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let (w, h) = (self.width as i32, self.height as i32);
        ((0..w).contains(&x) && (0..h).contains(&y)).then(|| y as usize * self.width + x as usize)
    }

    #[inline]
    pub fn plot(&mut self, x: i32, y: i32, colour: u32) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = colour;
        }
    }

    /// Bresenham; clipped per pixel.
    pub fn draw_line(&mut self, mut x0: i32, mut y0: i32, x1: i32, y1: i32, colour: u32) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x0, y0, colour);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, colour: u32) {
        for yy in y..y + h {
            for xx in x..x + w {
                self.plot(xx, yy, colour);
            }
        }
    }

    /// Axis-aligned box around `origin .. origin + size`.
    pub fn outline(&mut self, origin: Vec2, size: Vec2, colour: u32) {
        if size.x <= 0.0 || size.y <= 0.0 {
            return;
        }
        let (x0, y0) = (origin.x as i32, origin.y as i32);
        let (x1, y1) = ((origin.x + size.x) as i32 - 1, (origin.y + size.y) as i32 - 1);
        self.draw_line(x0, y0, x1, y0, colour);
        self.draw_line(x1, y0, x1, y1, colour);
        self.draw_line(x1, y1, x0, y1, colour);
        self.draw_line(x0, y1, x0, y0, colour);
    }

    pub fn outline_clickable(&mut self, c: &Clickable, colour: u32) {
        self.outline(c.origin, c.size, colour);
    }

    /// Plus sign of half-length `arm` in the middle of the screen.
    pub fn crosshair(&mut self, arm: i32, colour: u32) {
        let (cx, cy) = (self.width as i32 / 2, self.height as i32 / 2);
        self.draw_line(cx - arm, cy, cx + arm, cy, colour);
        self.draw_line(cx, cy - arm, cx, cy + arm, colour);
    }

    /// Top-down map in the top-left corner, `cell_px` pixels per cell.
    ///
    /// Grid rows (`x`) run down the screen and columns (`y`) across, the way
    /// the level text is written.
    pub fn minimap(&mut self, grid: &Grid, sprites: &[Sprite], cam: &Camera, cell_px: i32) {
        for x in 0..grid.size() {
            for (y, &v) in grid.row(x).iter().enumerate() {
                let colour = if is_wall_material(v) {
                    MAP_WALL
                } else {
                    MAP_FLOOR
                };
                self.fill_rect(y as i32 * cell_px, x as i32 * cell_px, cell_px, cell_px, colour);
            }
        }

        let to_px = |p: DVec2| ((p.y * cell_px as f64) as i32, (p.x * cell_px as f64) as i32);
        for s in sprites {
            let (sx, sy) = to_px(s.pos);
            self.fill_rect(sx - 1, sy - 1, 2, 2, MAP_SPRITE);
        }

        let (px, py) = to_px(cam.pos);
        let (dx, dy) = to_px(cam.pos + cam.dir);
        self.draw_line(px, py, dx, dy, MAP_PLAYER);
        self.fill_rect(px - 1, py - 1, 3, 3, MAP_PLAYER);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    fn blank(w: usize, h: usize) -> Canvas {
        let mut c = Canvas::default();
        c.load_rgb(&vec![0; w * h * 3], w, h);
        c
    }

    #[test]
    fn rgb_packs_to_0rgb() {
        let mut c = Canvas::default();
        c.load_rgb(&[0x12, 0x34, 0x56, 0xFF, 0x00, 0x80], 2, 1);
        assert_eq!(c.as_slice(), &[0x0012_3456, 0x00FF_0080]);
    }

    #[test]
    fn line_hits_both_endpoints_and_clips() {
        let mut c = blank(8, 8);
        c.draw_line(-3, 2, 5, 2, 1);
        assert_eq!(c.pixel(0, 2), Some(1));
        assert_eq!(c.pixel(5, 2), Some(1));
        assert_eq!(c.pixel(6, 2), Some(0));

        c.draw_line(7, 7, 1, 1, 2);
        assert_eq!(c.pixel(4, 4), Some(2));
    }

    #[test]
    fn crosshair_is_centred() {
        let mut c = blank(20, 10);
        c.crosshair(2, CROSSHAIR);
        assert_eq!(c.pixel(10, 5), Some(CROSSHAIR));
        assert_eq!(c.pixel(8, 5), Some(CROSSHAIR));
        assert_eq!(c.pixel(10, 3), Some(CROSSHAIR));
        assert_eq!(c.pixel(7, 5), Some(0));
    }

    #[test]
    fn outline_covers_border_only() {
        let mut c = blank(10, 10);
        c.outline(vec2(2.0, 2.0), vec2(4.0, 3.0), OUTLINE);
        assert_eq!(c.pixel(2, 2), Some(OUTLINE));
        assert_eq!(c.pixel(5, 4), Some(OUTLINE));
        assert_eq!(c.pixel(3, 3), Some(0));
        assert_eq!(c.pixel(6, 2), Some(0));
    }

    #[test]
    fn minimap_marks_walls_and_player() {
        let level = crate::world::Level::default();
        let mut c = blank(200, 200);
        c.minimap(&level.grid, &level.sprites, &level.start, 4);
        assert_eq!(c.pixel(1, 1), Some(MAP_WALL));
        // grid row 4 holds a wall at column 3: drawn at screen (3, 4) cells
        assert_eq!(level.grid.cell(4, 3), Some(2));
        assert_eq!(c.pixel(13, 17), Some(MAP_WALL));
        assert_eq!(c.pixel(5, 17), Some(MAP_FLOOR));
        let p = level.start.pos;
        assert_eq!(
            c.pixel((p.y * 4.0) as i32, (p.x * 4.0) as i32),
            Some(MAP_PLAYER)
        );
    }
}
