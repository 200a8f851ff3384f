use super::texture::TextureId;

/// Cell value of walkable space.
pub const EMPTY: u8 = 0;
/// Highest cell value that is drawn as a wall.
pub const LAST_WALL: u8 = 8;
/// Reserved texture ids sampled by floor/ceiling casting.
pub const FLOOR_TEXTURE: TextureId = 9;
pub const CEILING_TEXTURE: TextureId = 10;
/// Highest id a level may place in the grid or on a sprite.
pub const LAST_MATERIAL: u8 = 13;

/// Square tile map, row-major.
///
/// Addressed the way the camera is: `cell(x, y)` reads `rows[x][y]`, so the
/// camera's `pos.x` selects the row.  The editor guarantees the border is
/// solid; [`Level::parse`](super::Level::parse) enforces it on load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<u8>,
}

impl Grid {
    /// Build from rows.  Returns `None` unless the rows form a non-empty
    /// square.
    pub fn from_rows(rows: &[Vec<u8>]) -> Option<Self> {
        let size = rows.len();
        if size == 0 || rows.iter().any(|r| r.len() != size) {
            return None;
        }
        Some(Self {
            size,
            cells: rows.iter().flatten().copied().collect(),
        })
    }

    /// Side length in cells.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Cell value, or `None` outside the map.
    #[inline]
    pub fn cell(&self, x: i32, y: i32) -> Option<u8> {
        let (x, y) = (usize::try_from(x).ok()?, usize::try_from(y).ok()?);
        if x >= self.size || y >= self.size {
            return None;
        }
        self.cells.get(x * self.size + y).copied()
    }

    /// True for walkable cells; everything outside the map counts as solid.
    #[inline]
    pub fn is_empty(&self, x: i32, y: i32) -> bool {
        self.cell(x, y) == Some(EMPTY)
    }

    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        if x < self.size && y < self.size {
            self.cells[x * self.size + y] = value;
        }
    }

    /// Row `x` as a slice.
    pub fn row(&self, x: usize) -> &[u8] {
        &self.cells[x * self.size..][..self.size]
    }

    /// True if every border cell is non-empty, which is what keeps the
    /// DDA inside the map.
    pub fn has_solid_border(&self) -> bool {
        let last = self.size - 1;
        (0..self.size).all(|i| {
            self.cells[i] != EMPTY
                && self.cells[last * self.size + i] != EMPTY
                && self.cells[i * self.size] != EMPTY
                && self.cells[i * self.size + last] != EMPTY
        })
    }
}

/// Cell values drawn by the wall caster.
#[inline]
pub fn is_wall_material(v: u8) -> bool {
    (1..=LAST_WALL).contains(&v)
}
