use crate::renderer::{
    Renderer, Scene,
    software::{clickable::ClickRegistry, frame::Frame},
};

/// Column raycaster.
///
/// Frame-scoped state lives here and is overwritten every frame:
/// * `frame`  – RGB output,
/// * `depth`  – perpendicular wall distance per column, written by the wall
///   pass and read by the sprite pass,
/// * `clickables` – pick regions produced by the sprite pass,
/// * `sprite_order` / `sprite_dist` – sort scratch, kept to avoid
///   reallocating each frame.
#[derive(Default)]
pub struct Software {
    pub(super) frame: Frame,
    pub(super) depth: Vec<f64>,
    pub(super) clickables: ClickRegistry,
    pub(super) sprite_order: Vec<usize>,
    pub(super) sprite_dist: Vec<f64>,

    pub(super) width: usize,
    pub(super) height: usize,
}

impl Renderer for Software {
    fn begin_frame(&mut self, w: usize, h: usize) {
        if w != self.width || h != self.height {
            self.width = w;
            self.height = h;
            self.depth.resize(w, f64::INFINITY);
        }
        self.frame.reset(w, h);
        // nothing is occluded until the wall pass says so
        self.depth.fill(f64::INFINITY);
        self.clickables.clear();
    }

    fn draw_scene(&mut self, scene: &Scene<'_>) {
        self.cast_walls(scene.camera, &scene.level.grid, scene.bank);
        self.cast_sprites(
            scene.camera,
            &scene.level.sprites,
            scene.bank,
            scene.highlight,
        );
    }

    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[u8], usize, usize),
    {
        submit(self.frame.as_bytes(), self.width, self.height);
    }
}

impl Software {
    pub fn new(width: usize, height: usize) -> Self {
        let mut sw = Self::default();
        sw.begin_frame(width, height);
        sw
    }

    #[inline]
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Per-column wall distances of the last wall pass.
    #[inline]
    pub fn depth(&self) -> &[f64] {
        &self.depth
    }

    #[inline]
    pub fn clickables(&self) -> &ClickRegistry {
        &self.clickables
    }

    /// Interaction code may flip flags or detach sprite indices between
    /// frames; the next `begin_frame` discards the registry.
    #[inline]
    pub fn clickables_mut(&mut self) -> &mut ClickRegistry {
        &mut self.clickables
    }
}
