// Format-agnostic repository of textures handed over by the asset loader.
// The casters and the level model interact through `TextureId` only.

use std::collections::HashMap;

/// Runtime handle for a texture in this bank.
///
/// Grid cells and sprites store the same number, so a cell value of `3`
/// samples texture `3`.
pub type TextureId = u8;

/// Packed texel, `0xAARRGGBB`.  Alpha is carried but never written out.
pub type Argb = u32;

/// `TextureId` whose pixels are the checkerboard fallback.
/// Always = 0 because `TextureBank::new()` inserts it first.
pub const NO_TEXTURE: TextureId = 0;

/// Pack opaque colour channels into a texel.
#[inline]
pub fn pack(r: u8, g: u8, b: u8) -> Argb {
    0xFF00_0000 | (r as u32) << 16 | (g as u32) << 8 | b as u32
}

/// Edge length of the textures produced by [`TextureBank::procedural`].
pub const TEXTURE_SIZE: usize = 64;

/// CPU-side storage: packed texels in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    pub name: String,
    pub w: usize,
    pub h: usize,
    pub pixels: Vec<Argb>,
}

/// Convenience checkerboard 8×8 (magenta/black).
impl Default for Texture {
    fn default() -> Self {
        const LIGHT: Argb = 0xFF_FF00FF;
        const DARK: Argb = 0xFF_202020;
        let mut pix = vec![0; 8 * 8];
        for y in 0..8 {
            for x in 0..8 {
                pix[y * 8 + x] = if (x ^ y) & 1 == 0 { LIGHT } else { DARK };
            }
        }
        Texture {
            name: "CHECKER".to_string(),
            w: 8,
            h: 8,
            pixels: pix,
        }
    }
}

impl Texture {
    /// Texel at (`x`, `y`), or `None` when the index falls outside the
    /// pixel vector (malformed or undersized texture data).
    #[inline]
    pub fn texel(&self, x: i64, y: i64) -> Option<Argb> {
        if x < 0 || y < 0 {
            return None;
        }
        let idx = (self.w as i64).checked_mul(y)?.checked_add(x)?;
        self.pixels.get(usize::try_from(idx).ok()?).copied()
    }
}

/// Things that can go wrong when using the bank.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextureError {
    /// Attempted to insert a second texture with an existing name.
    #[error("texture name `{0}` already present in bank")]
    Duplicate(String),

    /// Requested ID is outside `0 .. bank.len()`.
    #[error("texture id {0} out of range")]
    BadId(TextureId),

    /// The bank is addressed by `u8`; it cannot hold more textures.
    #[error("texture bank is full")]
    Full,
}

/// A format-agnostic cache of textures.
///
/// * Does **not** know about image files; pixels come from generators such
///   as [`TextureBank::procedural`].
/// * Stores exactly one copy of every name.
/// * ID **0** is always the “missing” checkerboard.
///
/// **Thread-safety:** the casters only ever borrow the bank immutably for the
/// duration of a frame; replace or extend it between frames.
pub struct TextureBank {
    by_name: HashMap<String, TextureId>,
    data: Vec<Texture>,
}

impl TextureBank {
    // ---------------------------------------------------------------------
    // Constructors
    // ---------------------------------------------------------------------

    /// Create an empty bank with a mandatory *missing* texture used as
    /// fallback.  The texture is inserted under the fixed name `"MISSING"`
    /// and obtains the handle **0**.
    pub fn new(missing_tex: Texture) -> Self {
        let mut by_name = HashMap::new();
        by_name.insert("MISSING".into(), NO_TEXTURE);
        Self {
            by_name,
            data: vec![missing_tex],
        }
    }

    pub fn default_with_checker() -> Self {
        Self::new(Texture::default())
    }

    /// Bank holding generated textures for every material id `1..=13`,
    /// each `size`×`size` texels.
    pub fn procedural(size: usize) -> Self {
        let mut bank = Self::default_with_checker();
        for (name, tex) in super::procedural::material_textures(size) {
            // names are unique and there are far fewer than 255 of them
            if let Err(err) = bank.insert(name, tex) {
                log::warn!("skipping generated texture: {err}");
            }
        }
        bank
    }

    // ---------------------------------------------------------------------
    // Query helpers
    // ---------------------------------------------------------------------

    /// Number of textures stored (including the “missing” one).
    pub fn len(&self) -> usize {
        self.data.len()
    }
    pub fn is_empty(&self) -> bool {
        self.data.len() == 1
    } // only checker

    /// Obtain the id for a *loaded* texture by name.
    /// Returns `None` if the name is unknown.
    pub fn id(&self, name: &str) -> Option<TextureId> {
        self.by_name.get(name).copied()
    }

    /// Borrow a texture by id, with bounds-checking.
    pub fn texture(&self, id: TextureId) -> Result<&Texture, TextureError> {
        self.data.get(id as usize).ok_or(TextureError::BadId(id))
    }

    /// Fallback-safe query: unknown ids resolve to the checkerboard.
    ///
    /// Called per column, so it stays quiet; check a level up front with
    /// [`missing`](Self::missing).
    pub fn texture_or_missing(&self, id: TextureId) -> &Texture {
        match self.data.get(id as usize) {
            Some(tex) => tex,
            None => {
                log::trace!("texture id {id} missing, using checkerboard");
                &self.data[NO_TEXTURE as usize]
            }
        }
    }

    #[inline]
    pub fn contains(&self, id: TextureId) -> bool {
        (id as usize) < self.data.len()
    }

    /// The ids in `ids` this bank cannot serve, in the order given.
    pub fn missing(&self, ids: impl IntoIterator<Item = TextureId>) -> Vec<TextureId> {
        ids.into_iter().filter(|&id| !self.contains(id)).collect()
    }

    // ---------------------------------------------------------------------
    // Mutations
    // ---------------------------------------------------------------------

    /// Insert a texture under `name`.
    ///
    /// * Returns the newly assigned `TextureId`.
    /// * Fails if the name already exists (`Duplicate`).
    pub fn insert<S: Into<String>>(
        &mut self,
        name: S,
        tex: Texture,
    ) -> Result<TextureId, TextureError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(TextureError::Duplicate(name));
        }
        let id = TextureId::try_from(self.data.len()).map_err(|_| TextureError::Full)?;
        self.data.push(tex);
        self.by_name.insert(name, id);
        Ok(id)
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    fn dummy_tex(color: Argb) -> Texture {
        Texture {
            name: "Dummy".to_string(),
            w: 2,
            h: 2,
            pixels: vec![color; 4],
        }
    }

    #[test]
    fn insert_and_lookup() {
        let mut bank = TextureBank::default_with_checker();
        let red = bank.insert("RED", dummy_tex(0xFF_FF0000)).unwrap();
        let blue = bank.insert("BLUE", dummy_tex(0xFF_0000FF)).unwrap();

        assert_ne!(red, NO_TEXTURE);
        assert_ne!(blue, red);
        assert_eq!(bank.id("RED"), Some(red));
        assert_eq!(bank.id("BLUE"), Some(blue));
        assert_eq!(bank.id("NOPE"), None);

        assert_eq!(bank.texture(red).unwrap().pixels[0], 0xFF_FF0000);
        assert_eq!(bank.texture(blue).unwrap().pixels[0], 0xFF_0000FF);
    }

    #[test]
    fn duplicate_name_rejected() {
        let mut bank = TextureBank::default_with_checker();
        bank.insert("WOOD", dummy_tex(1)).unwrap();
        let err = bank.insert("WOOD", dummy_tex(2)).unwrap_err();
        assert_eq!(err, TextureError::Duplicate("WOOD".into()));
        // texture count still 2 (checker + first WOOD)
        assert_eq!(bank.len(), 2);
    }

    #[test]
    fn bad_id_guard() {
        let bank = TextureBank::default_with_checker();
        let bad = TextureId::MAX;
        assert_eq!(bank.texture(bad).unwrap_err(), TextureError::BadId(bad));
        assert_eq!(bank.texture_or_missing(bad).name, "CHECKER");
    }

    #[test]
    fn texel_rejects_out_of_range() {
        let tex = dummy_tex(7);
        assert_eq!(tex.texel(1, 1), Some(7));
        assert_eq!(tex.texel(-1, 0), None);
        assert_eq!(tex.texel(0, 2), None);
        // short pixel vector: index 3 is past the end
        let short = Texture {
            pixels: vec![7; 3],
            ..dummy_tex(7)
        };
        assert_eq!(short.texel(1, 1), None);
    }

    #[test]
    fn procedural_bank_covers_every_material() {
        let bank = TextureBank::procedural(16);
        assert_eq!(bank.len(), 14);
        for id in 1..=13 {
            let tex = bank.texture(id).unwrap();
            assert_eq!((tex.w, tex.h), (16, 16));
            assert_eq!(tex.pixels.len(), 256);
        }
        assert_eq!(bank.id("FLOOR"), Some(9));
        assert_eq!(bank.id("LIGHT"), Some(12));
    }

    #[test]
    fn missing_lists_ids_the_bank_cannot_serve() {
        let mut bank = TextureBank::default_with_checker();
        bank.insert("ONE", dummy_tex(1)).unwrap();
        assert!(bank.contains(NO_TEXTURE) && bank.contains(1));
        assert!(!bank.contains(2));
        assert_eq!(bank.missing([1, 9, 2, 0]), vec![9, 2]);
        assert!(TextureBank::procedural(8).missing(1..=13).is_empty());
    }

    #[test]
    fn pack_is_opaque_argb() {
        assert_eq!(pack(0x12, 0x34, 0x56), 0xFF12_3456);
    }
}
