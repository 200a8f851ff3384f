// ──────────────────────────────────────────────────────────────────────────
// world/level.rs
//
//  *   text level  ──parse──▶  Grid + Vec<Sprite> + start Camera
//
//  Format, one item per line (`#` starts a comment):
//      1 1 1 1          grid row, comma or whitespace separated cell ids
//      sprite X Y TEX   billboard at grid position (X, Y)
//      start X Y DX DY  player position and facing
// ──────────────────────────────────────────────────────────────────────────

use std::{collections::BTreeSet, path::Path};

use glam::{DVec2, dvec2};
use once_cell::sync::Lazy;
use thiserror::Error;

use super::{
    camera::Camera,
    grid::{CEILING_TEXTURE, FLOOR_TEXTURE, Grid, LAST_MATERIAL, LAST_WALL, is_wall_material},
    sprite::Sprite,
    texture::TextureId,
};

/// Field-of-view ratio given to the start camera (`|plane| / |dir|`).
pub const DEFAULT_FOV_RATIO: f64 = 0.66;

/*──────────────────────────── Error type ───────────────────────────*/

#[derive(Error, Debug)]
pub enum LevelError {
    #[error("level has no grid rows")]
    Empty,

    #[error("grid is {rows} rows but row {row} has {cols} cells; the map must be square")]
    NotSquare { rows: usize, row: usize, cols: usize },

    #[error("border cell ({x}, {y}) is empty; the map edge must be solid")]
    OpenBorder { x: usize, y: usize },

    #[error("line {line}: bad cell `{token}`")]
    BadCell { line: usize, token: String },

    #[error("line {line}: malformed `{keyword}` entry")]
    BadEntry { line: usize, keyword: &'static str },

    #[error("sprite {index} at ({x}, {y}) lies outside the map or inside a wall")]
    BadSprite { index: usize, x: f64, y: f64 },

    #[error("player start lies outside the map, inside a wall, or has no facing")]
    BadStart,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/*====================================================================*/
/*                              Level                                 */
/*====================================================================*/

/// Everything the renderer reads per frame, owned in one place and lent to
/// the renderer, the movement code and the interaction code in turn.
#[derive(Clone, Debug)]
pub struct Level {
    pub grid: Grid,
    pub sprites: Vec<Sprite>,
    pub start: Camera,
}

static DEFAULT_LEVEL: Lazy<Level> =
    Lazy::new(|| Level::parse(DEFAULT_MAP).expect("built-in level is valid"));

impl Default for Level {
    fn default() -> Self {
        DEFAULT_LEVEL.clone()
    }
}

impl Level {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let src = std::fs::read_to_string(path.as_ref())?;
        let level = Self::parse(&src)?;
        log::info!(
            "loaded {} ({}×{} grid, {} sprites)",
            path.as_ref().display(),
            level.grid.size(),
            level.grid.size(),
            level.sprites.len()
        );
        Ok(level)
    }

    /// Parse and validate a text level.
    pub fn parse(src: &str) -> Result<Self, LevelError> {
        let mut rows: Vec<Vec<u8>> = Vec::new();
        let mut sprites = Vec::new();
        let mut start = None;

        for (n, raw) in src.lines().enumerate() {
            let line = n + 1;
            let text = raw.split('#').next().unwrap_or_default().trim();
            if text.is_empty() {
                continue;
            }
            let mut tokens = text
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|t| !t.is_empty());

            match text.split_whitespace().next() {
                Some("sprite") => {
                    let v = numbers::<3>(tokens.skip(1), line, "sprite")?;
                    let tex = u8::try_from(v[2] as i64)
                        .ok()
                        .filter(|t| v[2].fract() == 0.0 && *t <= LAST_MATERIAL)
                        .ok_or(LevelError::BadEntry {
                            line,
                            keyword: "sprite",
                        })?;
                    sprites.push(Sprite::new(v[0], v[1], tex));
                }
                Some("start") => {
                    let v = numbers::<4>(tokens.skip(1), line, "start")?;
                    start = Some(Camera::looking(
                        dvec2(v[0], v[1]),
                        dvec2(v[2], v[3]),
                        DEFAULT_FOV_RATIO,
                    ));
                }
                _ => {
                    let row = tokens
                        .by_ref()
                        .map(|t| {
                            // floor, ceiling and sprite ids never appear as cells
                            t.parse::<u8>()
                                .ok()
                                .filter(|v| *v <= LAST_WALL)
                                .ok_or_else(|| LevelError::BadCell {
                                    line,
                                    token: t.to_string(),
                                })
                        })
                        .collect::<Result<Vec<_>, _>>()?;
                    rows.push(row);
                }
            }
        }

        let grid = Self::build_grid(&rows)?;
        let start = start.unwrap_or_default();
        let level = Self {
            grid,
            sprites,
            start,
        };
        level.validate()?;
        Ok(level)
    }

    fn build_grid(rows: &[Vec<u8>]) -> Result<Grid, LevelError> {
        if rows.is_empty() {
            return Err(LevelError::Empty);
        }
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != rows.len()) {
            return Err(LevelError::NotSquare {
                rows: rows.len(),
                row,
                cols: r.len(),
            });
        }
        let grid = Grid::from_rows(rows).ok_or(LevelError::Empty)?;
        if !grid.has_solid_border() {
            let last = grid.size() - 1;
            let (x, y) = (0..grid.size())
                .flat_map(|i| [(0, i), (last, i), (i, 0), (i, last)])
                .find(|&(x, y)| grid.is_empty(x as i32, y as i32))
                .unwrap_or((0, 0));
            return Err(LevelError::OpenBorder { x, y });
        }
        Ok(grid)
    }

    fn validate(&self) -> Result<(), LevelError> {
        for (index, s) in self.sprites.iter().enumerate() {
            if !self.grid.is_empty(s.pos.x.floor() as i32, s.pos.y.floor() as i32) {
                return Err(LevelError::BadSprite {
                    index,
                    x: s.pos.x,
                    y: s.pos.y,
                });
            }
        }
        let p = self.start.pos;
        if !self.grid.is_empty(p.x.floor() as i32, p.y.floor() as i32) {
            return Err(LevelError::BadStart);
        }
        // zero or non-finite facing leaves the camera matrix singular
        if !self.start.dir.is_finite()
            || self.start.dir == DVec2::ZERO
            || !self.start.inv_det().is_finite()
        {
            return Err(LevelError::BadStart);
        }
        Ok(())
    }

    /// Every texture id a frame of this level samples: wall cells, floor,
    /// ceiling and sprite textures.
    pub fn texture_ids(&self) -> BTreeSet<TextureId> {
        let mut ids: BTreeSet<TextureId> = (0..self.grid.size())
            .flat_map(|x| self.grid.row(x).iter().copied())
            .filter(|&v| is_wall_material(v))
            .collect();
        ids.extend([FLOOR_TEXTURE, CEILING_TEXTURE]);
        ids.extend(self.sprites.iter().map(|s| s.texture));
        ids
    }

    /// Remove the sprite at `index`.  Indices above it shift down by one,
    /// which is why clickables are rebuilt every frame.
    pub fn delete_sprite(&mut self, index: usize) -> Option<Sprite> {
        if index >= self.sprites.len() {
            return None;
        }
        let s = self.sprites.remove(index);
        log::info!("sprite {index} (texture {}) removed", s.texture);
        Some(s)
    }
}

fn numbers<'a, const N: usize>(
    mut tokens: impl Iterator<Item = &'a str>,
    line: usize,
    keyword: &'static str,
) -> Result<[f64; N], LevelError> {
    let bad = || LevelError::BadEntry { line, keyword };
    let mut out = [0.0; N];
    for slot in out.iter_mut() {
        *slot = tokens
            .next()
            .and_then(|t| t.parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .ok_or_else(bad)?;
    }
    if tokens.next().is_some() {
        return Err(bad());
    }
    Ok(out)
}

const DEFAULT_MAP: &str = "\
# built-in level
1 1 1 1 1 1 1 1 1 1 1 1 1 1 1 1 1 1 1 1 1 1 1 1
1 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 1
1 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 1
1 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 1
1 0 0 2 2 2 2 2 2 2 0 0 0 0 0 0 0 0 0 0 0 0 0 1
1 0 0 2 0 0 0 0 0 2 0 0 0 0 0 0 0 0 0 0 0 0 0 1
1 0 0 2 0 0 0 0 0 2 0 0 0 0 3 3 3 3 3 3 0 0 0 1
1 0 0 2 0 0 0 0 0 2 0 0 0 0 3 0 0 0 0 0 0 0 0 1
1 0 0 2 0 0 0 0 0 2 0 0 0 0 0 0 0 0 0 0 0 0 0 1
1 0 0 0 0 0 0 0 0 0 0 0 0 0 3 0 0 0 0 0 0 0 0 1
1 0 0 0 0 0 0 0 0 0 0 0 0 0 3 3 3 3 3 3 0 0 0 1
1 0 0 0 0 0 0 0 0 0 0 4 0 0 0 0 0 0 0 0 0 0 0 1
1 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 1
1 0 0 0 0 5 0 5 0 5 0 0 0 0 0 0 0 0 0 0 0 0 0 1
1 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 1
1 0 0 0 0 5 0 5 0 5 0 0 0 0 6 6 6 0 6 6 6 0 0 1
1 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 1
1 0 0 0 0 5 0 5 0 5 0 0 0 0 0 0 0 0 0 0 0 0 0 1
1 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 7 7 0 0 0 1
1 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 7 7 0 0 0 1
1 0 0 8 8 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 1
1 0 0 8 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 1
1 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 1
1 1 1 1 1 1 1 1 1 1 1 1 1 1 1 1 1 1 1 1 1 1 1 1
sprite 20.5 11.5 12
sprite 18.5 4.5 11
sprite 8.5 16.5 13
sprite 12.5 5.5 11
sprite 16.5 11.5 12
sprite 14.5 8.5 13
sprite 21.5 20.5 11
sprite 3.5 20.5 12
sprite 6.5 6.5 13
sprite 13.5 21.5 11
start 22 11.5 -1 0
";

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
