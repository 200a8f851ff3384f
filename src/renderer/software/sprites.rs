//! Sprite pass: billboards sorted far-to-near, clipped per column against
//! the wall depth buffer.

use glam::vec2;

use crate::{
    renderer::{
        ShadeStyle,
        software::{Software, clickable::Clickable, sort::comb_sort},
    },
    world::{Argb, Camera, Sprite, TextureBank},
};

/// Texels whose colour channels are all zero are not drawn.
const TRANSPARENT_MASK: Argb = 0x00FF_FFFF;

/// Screen-space placement of one billboard.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Projected {
    /// Camera-space depth; ≤ 0 means behind the eye.
    depth: f64,
    /// Centre column (may lie off-screen).
    screen_x: i32,
    /// Edge length in pixels; billboards are square.
    size: i32,
    /// First column of the unclipped billboard.
    left: i32,
    x0: i32,
    x1: i32,
    y0: i32,
    y1: i32,
}

impl Software {
    fn project_sprite(&self, cam: &Camera, sprite: &Sprite) -> Projected {
        let (w, h) = (self.width as i32, self.height as i32);
        let t = cam.to_cam(sprite.pos);

        let screen_x = ((w / 2) as f64 * (1.0 + t.x / t.y)) as i32;
        // depth instead of distance keeps billboards free of fisheye
        let size = (h as f64 / t.y).abs() as i32;
        let left = screen_x.saturating_sub(size / 2);

        Projected {
            depth: t.y,
            screen_x,
            size,
            left,
            x0: left.max(0),
            x1: screen_x.saturating_add(size / 2).min(w - 1),
            y0: (-size / 2 + h / 2).max(0),
            y1: (size / 2 + h / 2).min(h - 1),
        }
    }

    /// Draw every sprite over the finished wall pass and rebuild the
    /// clickable registry.  `highlight` selects one sprite index to draw
    /// brightened.
    pub fn cast_sprites(
        &mut self,
        cam: &Camera,
        sprites: &[Sprite],
        bank: &TextureBank,
        highlight: Option<usize>,
    ) {
        self.clickables.clear();
        if self.width == 0 || self.height == 0 {
            return;
        }

        /* far-to-near order --------------------------------------------*/
        self.sprite_order.clear();
        self.sprite_dist.clear();
        for (i, s) in sprites.iter().enumerate() {
            self.sprite_order.push(i);
            self.sprite_dist.push(cam.pos.distance_squared(s.pos));
        }
        comb_sort(&mut self.sprite_order, &mut self.sprite_dist);

        let (w, h) = (self.width as i32, self.height as i64);
        for k in 0..self.sprite_order.len() {
            let idx = self.sprite_order[k];
            let sprite = &sprites[idx];
            let p = self.project_sprite(cam, sprite);

            let mut click = Clickable::new(
                vec2(p.screen_x as f32 - p.size as f32 / 4.0, p.y0 as f32),
                vec2(p.size as f32 / 2.0, (p.y1 - p.y0) as f32),
                idx,
            );

            let tex = bank.texture_or_missing(sprite.texture);
            let style = if highlight == Some(idx) {
                ShadeStyle::Highlighted
            } else {
                ShadeStyle::Normal
            };
            let size = p.size as i64;
            let mut drawn = false;

            if size > 0 {
                for stripe in p.x0..p.x1 {
                    if !(p.depth > 0.0
                        && (0..w).contains(&stripe)
                        && p.depth < self.depth[stripe as usize])
                    {
                        continue;
                    }
                    drawn = true;

                    let tex_x =
                        (256 * (stripe as i64 - p.left as i64) * tex.w as i64 / size) / 256;
                    for y in p.y0..p.y1 {
                        let d = y as i64 * 256 - h * 128 + size * 128;
                        let tex_y = (d * tex.h as i64) / size / 256;
                        match tex.texel(tex_x, tex_y) {
                            Some(c) if c & TRANSPARENT_MASK != 0 => {
                                self.frame.set_pixel(stripe, y, c, style)
                            }
                            _ => {}
                        }
                    }
                }
            }

            click.set_visible(drawn);
            click.set_destructible(drawn && sprite.kind().is_destructible());
            self.clickables.push(click);
        }
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
