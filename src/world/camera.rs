use glam::{DVec2, dvec2};

/// Player view-point in grid space.
///
/// * `dir` is where the eye looks, `plane` is the half-width of the view
///   plane; `|plane| / |dir|` sets the field of view (0.66 ≈ 66°).
/// * Only yaw is simulated: `dir` and `plane` are always rotated together
///   and must stay linearly independent, otherwise [`Camera::inv_det`]
///   blows up and sprite projection is undefined.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub pos: DVec2,
    pub dir: DVec2,
    pub plane: DVec2,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(dvec2(22.0, 11.5), dvec2(-1.0, 0.0), dvec2(0.0, 0.66))
    }
}

impl Camera {
    pub fn new(pos: DVec2, dir: DVec2, plane: DVec2) -> Self {
        Self { pos, dir, plane }
    }

    /// Camera looking along `dir` with a view plane of relative width
    /// `fov_ratio` to its right.
    pub fn looking(pos: DVec2, dir: DVec2, fov_ratio: f64) -> Self {
        let dir = dir.normalize_or_zero();
        Self {
            pos,
            dir,
            plane: -dir.perp() * fov_ratio,
        }
    }

    /// `1 / det([plane dir])`, the scale of the inverse camera matrix.
    #[inline]
    pub fn inv_det(&self) -> f64 {
        1.0 / (self.plane.x * self.dir.y - self.dir.x * self.plane.y)
    }

    /// Ray through normalised screen column `camera_x ∈ [-1, 1]`.
    #[inline]
    pub fn ray(&self, camera_x: f64) -> DVec2 {
        self.dir + self.plane * camera_x
    }

    /// Transform a world point into camera space:
    ///  .x = lateral offset along the view plane
    ///  .y = depth along `dir`
    #[inline]
    pub fn to_cam(&self, p: DVec2) -> DVec2 {
        let rel = p - self.pos;
        let inv_det = self.inv_det();
        dvec2(
            inv_det * (self.dir.y * rel.x - self.dir.x * rel.y),
            inv_det * (-self.plane.y * rel.x + self.plane.x * rel.y),
        )
    }

    /*──────────────────────── movement helpers ──────────────────────*/

    /// Rotate `dir` and `plane` by `angle` radians (positive = turn left).
    pub fn rotate(&mut self, angle: f64) {
        let rot = DVec2::from_angle(angle);
        self.dir = rot.rotate(self.dir);
        self.plane = rot.rotate(self.plane);
    }

    /// Direction 90° clockwise from `dir` (strafe right).
    #[inline]
    pub fn right(&self) -> DVec2 {
        -self.dir.perp()
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
