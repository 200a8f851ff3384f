//! Wall pass: one DDA ray per screen column, textured wall slice, then
//! floor and ceiling below and above it.

use glam::DVec2;

use crate::{
    renderer::{ShadeStyle, software::Software},
    world::{CEILING_TEXTURE, Camera, FLOOR_TEXTURE, Grid, TextureBank},
};

/// Which family of grid lines the ray crossed last.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitSide {
    /// Crossed a vertical grid line (stepped along X).
    X,
    /// Crossed a horizontal grid line (stepped along Y); drawn darker.
    Y,
}

/// Result of marching one ray through the grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub map_x: i32,
    pub map_y: i32,
    /// Cell value that stopped the ray (0 when it left the map).
    pub cell: u8,
    pub side: HitSide,
    /// Distance to the camera plane, not to the eye.
    pub perp_dist: f64,
}

/// March `ray` from `origin` until it enters a non-empty cell.
///
/// Cells outside the map count as solid, so a map without a solid border
/// still terminates (drawing nothing sensible there).
pub fn cast_ray(grid: &Grid, origin: DVec2, ray: DVec2) -> RayHit {
    let mut map_x = origin.x.floor() as i32;
    let mut map_y = origin.y.floor() as i32;

    // |ray| / |ray.x| and |ray| / |ray.y|; an axis-parallel ray gives ∞
    // for the other axis, which the comparisons below handle.
    let delta_x = (1.0 + (ray.y * ray.y) / (ray.x * ray.x)).sqrt();
    let delta_y = (1.0 + (ray.x * ray.x) / (ray.y * ray.y)).sqrt();

    let (step_x, mut side_x) = if ray.x < 0.0 {
        (-1, (origin.x - map_x as f64) * delta_x)
    } else {
        (1, (map_x as f64 + 1.0 - origin.x) * delta_x)
    };
    let (step_y, mut side_y) = if ray.y < 0.0 {
        (-1, (origin.y - map_y as f64) * delta_y)
    } else {
        (1, (map_y as f64 + 1.0 - origin.y) * delta_y)
    };

    let (side, cell) = loop {
        let side = if side_x < side_y {
            side_x += delta_x;
            map_x += step_x;
            HitSide::X
        } else {
            side_y += delta_y;
            map_y += step_y;
            HitSide::Y
        };
        match grid.cell(map_x, map_y) {
            Some(0) => continue,
            Some(v) => break (side, v),
            None => break (side, 0),
        }
    };

    let perp_dist = match side {
        HitSide::X => (map_x as f64 - origin.x + (1 - step_x) as f64 / 2.0) / ray.x,
        HitSide::Y => (map_y as f64 - origin.y + (1 - step_y) as f64 / 2.0) / ray.y,
    };

    RayHit {
        map_x,
        map_y,
        cell,
        side,
        perp_dist,
    }
}

impl Software {
    /// Draw walls, floor and ceiling for every column and refill the depth
    /// buffer.
    pub fn cast_walls(&mut self, cam: &Camera, grid: &Grid, bank: &TextureBank) {
        let w = self.width;
        let h = self.height as i32;
        if w == 0 || h == 0 {
            return;
        }
        let floor_tex = bank.texture_or_missing(FLOOR_TEXTURE);
        let ceil_tex = bank.texture_or_missing(CEILING_TEXTURE);

        for x in 0..w {
            let col = x as i32;
            let camera_x = 2.0 * x as f64 / w as f64 - 1.0;
            let ray = cam.ray(camera_x);
            let hit = cast_ray(grid, cam.pos, ray);

            /* on-screen span ----------------------------------------------*/
            let line_h = (h as f64 / hit.perp_dist) as i32;
            let draw_start = (-line_h / 2 + h / 2).max(0);
            let draw_end = (line_h / 2 + h / 2).min(h - 1);

            /* where along the wall the ray landed, 0‥1 ---------------------*/
            let mut wall_x = match hit.side {
                HitSide::X => cam.pos.y + hit.perp_dist * ray.y,
                HitSide::Y => cam.pos.x + hit.perp_dist * ray.x,
            };
            wall_x -= wall_x.floor();

            /* textured slice ----------------------------------------------*/
            let tex = bank.texture_or_missing(hit.cell);
            let tex_w = tex.w as i64;
            let mut tex_x = (wall_x * tex.w as f64) as i64;
            if (hit.side == HitSide::X && ray.x > 0.0) || (hit.side == HitSide::Y && ray.y < 0.0) {
                tex_x = tex_w - tex_x - 1;
            }
            let style = match hit.side {
                HitSide::X => ShadeStyle::Normal,
                HitSide::Y => ShadeStyle::Darkened,
            };

            let (h64, lh64) = (h as i64, line_h as i64);
            if lh64 > 0 {
                for y in draw_start..=draw_end {
                    // 256× fixed point keeps the sample centred as in the
                    // classic integer formulation; the last row lands on
                    // `tex.h` and is pulled back onto the texture
                    let d = y as i64 * 256 - h64 * 128 + lh64 * 128;
                    let tex_y = ((d * tex.h as i64) / lh64 / 256).min(tex.h as i64 - 1);
                    if let Some(c) = tex.texel(tex_x, tex_y) {
                        self.frame.set_pixel(col, y, c, style);
                    }
                }
            }

            self.depth[x] = hit.perp_dist;

            /* floor & ceiling ---------------------------------------------*/
            let floor_wall = match (hit.side, ray.x > 0.0, ray.y > 0.0) {
                (HitSide::X, true, _) => DVec2::new(hit.map_x as f64, hit.map_y as f64 + wall_x),
                (HitSide::X, false, _) => {
                    DVec2::new(hit.map_x as f64 + 1.0, hit.map_y as f64 + wall_x)
                }
                (HitSide::Y, _, true) => DVec2::new(hit.map_x as f64 + wall_x, hit.map_y as f64),
                (HitSide::Y, _, false) => {
                    DVec2::new(hit.map_x as f64 + wall_x, hit.map_y as f64 + 1.0)
                }
            };

            let dist_wall = hit.perp_dist;
            for y in draw_end + 1..h {
                // distance of the floor point seen at row y
                let current = h as f64 / (2.0 * y as f64 - h as f64);
                let weight = current / dist_wall;
                let floor = floor_wall * weight + cam.pos * (1.0 - weight);

                let fx = (floor.x * floor_tex.w as f64) as i64;
                let fy = (floor.y * floor_tex.h as f64) as i64;
                if let Some(c) = floor_tex.texel(
                    fx.rem_euclid(floor_tex.w.max(1) as i64),
                    fy.rem_euclid(floor_tex.h.max(1) as i64),
                ) {
                    self.frame.set_pixel(col, y, c, ShadeStyle::Normal);
                }

                // odd heights mirror the first floor row onto the wall top
                let ceil_y = h - y;
                if ceil_y >= draw_start {
                    continue;
                }
                let cx = (floor.x * ceil_tex.w as f64) as i64;
                let cy = (floor.y * ceil_tex.h as f64) as i64;
                if let Some(c) = ceil_tex.texel(
                    cx.rem_euclid(ceil_tex.w.max(1) as i64),
                    cy.rem_euclid(ceil_tex.h.max(1) as i64),
                ) {
                    self.frame.set_pixel(col, ceil_y, c, ShadeStyle::Normal);
                }
            }
        }
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
