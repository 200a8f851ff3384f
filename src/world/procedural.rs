//! Generated stand-in textures for every material id.
//!
//! The renderer only needs *some* texels per id; these patterns keep the
//! viewer usable without image assets on disk.  Sprite textures use pure
//! black as the transparent colour.

use super::texture::{Argb, Texture, pack};

fn generate(name: &str, size: usize, f: impl Fn(usize, usize) -> Argb) -> Texture {
    let mut pixels = Vec::with_capacity(size * size);
    for y in 0..size {
        for x in 0..size {
            pixels.push(f(x, y));
        }
    }
    Texture {
        name: name.to_string(),
        w: size,
        h: size,
        pixels,
    }
}

/// All material textures in id order (`1..=13`), ready for
/// [`TextureBank::insert`](super::TextureBank::insert).
pub fn material_textures(size: usize) -> Vec<(&'static str, Texture)> {
    let s = size.max(1);
    // normalised 0‥255 ramps
    let ramp = move |v: usize| (v * 256 / s).min(255) as u8;
    let half = s / 2;
    let brick = (s / 4).max(1);

    let table: [(&'static str, Box<dyn Fn(usize, usize) -> Argb>); 13] = [
        (
            "REDCROSS",
            Box::new(move |x, y| {
                if x != y && x != s - 1 - y {
                    pack(254, 0, 0)
                } else {
                    pack(0, 0, 0)
                }
            }),
        ),
        (
            "GREYSLOPE",
            Box::new(move |x, y| {
                let v = ((ramp(x) as u32 + ramp(y) as u32) / 2) as u8;
                pack(v, v, v)
            }),
        ),
        (
            "YELLOWSLOPE",
            Box::new(move |x, y| {
                let v = ((ramp(x) as u32 + ramp(y) as u32) / 2) as u8;
                pack(v, v, 0)
            }),
        ),
        (
            "XORGREY",
            Box::new(move |x, y| {
                let v = ramp(x) ^ ramp(y);
                pack(v, v, v)
            }),
        ),
        ("XORGREEN", Box::new(move |x, y| pack(0, ramp(x) ^ ramp(y), 0))),
        (
            "REDBRICK",
            Box::new(move |x, y| {
                let row = y / brick;
                let shift = if row % 2 == 0 { 0 } else { brick / 2 };
                if y % brick == 0 || (x + shift) % brick == 0 {
                    pack(90, 90, 90)
                } else {
                    pack(192, 40, 30)
                }
            }),
        ),
        ("REDGRADIENT", Box::new(move |_, y| pack(ramp(y), 0, 0))),
        ("FLATGREY", Box::new(|_, _| pack(128, 128, 128))),
        (
            "FLOOR",
            Box::new(move |x, y| {
                if (x / brick + y / brick) % 2 == 0 {
                    pack(100, 80, 60)
                } else {
                    pack(70, 55, 40)
                }
            }),
        ),
        (
            "CEILING",
            Box::new(move |x, y| {
                let v = ramp(x) ^ ramp(y);
                pack(v / 4, v / 4, 96 + v / 3)
            }),
        ),
        (
            "BARREL",
            Box::new(move |x, y| {
                // upright drum in the lower half of the billboard
                let cx = x as i64 - half as i64;
                let hoop = (y % brick.max(2)) == 0;
                if y >= half && cx.unsigned_abs() < (s as u64) / 4 {
                    if hoop { pack(60, 60, 60) } else { pack(120, 70, 20) }
                } else {
                    pack(0, 0, 0)
                }
            }),
        ),
        (
            "LIGHT",
            Box::new(move |x, y| {
                // hanging lamp: short cord and a bulb near the top
                let dx = x as i64 - half as i64;
                let dy = y as i64 - (s / 4) as i64;
                let r = (s / 8).max(1) as i64;
                if dx * dx + dy * dy <= r * r {
                    pack(255, 240, 140)
                } else if dx == 0 && dy < 0 {
                    pack(40, 40, 40)
                } else {
                    pack(0, 0, 0)
                }
            }),
        ),
        (
            "PILLAR",
            Box::new(move |x, _| {
                let cx = x as i64 - half as i64;
                if cx.unsigned_abs() < (s as u64) / 6 + 1 {
                    let v = 140u8.saturating_add((cx.unsigned_abs() * 8).min(100) as u8);
                    pack(v, v, v)
                } else {
                    pack(0, 0, 0)
                }
            }),
        ),
    ];

    table
        .into_iter()
        .map(|(name, f)| (name, generate(name, s, f)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RGB_MASK: Argb = 0x00FF_FFFF;

    #[test]
    fn sprite_textures_have_transparent_and_opaque_texels() {
        let textures = material_textures(64);
        for (name, tex) in &textures[10..] {
            assert!(
                tex.pixels.iter().any(|p| p & RGB_MASK == 0),
                "{name} has no transparent texel"
            );
            assert!(
                tex.pixels.iter().any(|p| p & RGB_MASK != 0),
                "{name} has no visible texel"
            );
        }
    }

    #[test]
    fn texels_are_packed_opaque() {
        let textures = material_textures(64);
        let (name, cross) = &textures[0];
        assert_eq!(*name, "REDCROSS");
        assert_eq!(cross.pixels[1], pack(254, 0, 0));
        assert_eq!(cross.pixels[0], pack(0, 0, 0));
    }

    #[test]
    fn names_follow_material_order() {
        let names: Vec<_> = material_textures(8).into_iter().map(|(n, _)| n).collect();
        assert_eq!(names[8], "FLOOR");
        assert_eq!(names[9], "CEILING");
        assert_eq!(names[11], "LIGHT");
    }
}
