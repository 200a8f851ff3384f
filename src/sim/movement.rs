//! Camera movement with per-axis grid collision.

use glam::DVec2;

use super::InputCmd;
use crate::world::{Camera, Grid};

/// Cells per second.
pub const MOVE_SPEED: f64 = 5.0;
/// Radians per second per pixel of look delta.
pub const LOOK_SPEED: f64 = 0.3;

/// Outcome of one movement step.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MoveResult {
    pub moved: DVec2,
    /// At least one axis was refused because the target cell is solid.
    pub blocked: bool,
}

/// Turn and move `cam` by `cmd` over `dt` seconds.
///
/// Each axis is tried on its own: a move along X is taken only if the cell
/// it lands in is empty, then the same for Y.  Walking into a wall at an
/// angle therefore slides along it.
pub fn apply(cam: &mut Camera, grid: &Grid, cmd: &InputCmd, dt: f64) -> MoveResult {
    if !cmd.is_moving() {
        return MoveResult::default();
    }
    if cmd.look != 0.0 {
        // mouse right = turn right = negative angle
        cam.rotate(-cmd.look * dt * LOOK_SPEED);
    }

    let wish = cam.dir * cmd.forward + cam.right() * cmd.strafe;
    let step = wish.normalize_or_zero() * MOVE_SPEED * dt;
    if step == DVec2::ZERO {
        return MoveResult::default();
    }

    let start = cam.pos;
    let mut blocked = false;

    if grid.is_empty((cam.pos.x + step.x).floor() as i32, cam.pos.y.floor() as i32) {
        cam.pos.x += step.x;
    } else {
        blocked = true;
    }
    if grid.is_empty(cam.pos.x.floor() as i32, (cam.pos.y + step.y).floor() as i32) {
        cam.pos.y += step.y;
    } else {
        blocked = true;
    }

    MoveResult {
        moved: cam.pos - start,
        blocked,
    }
}
