//! Play-mode state: the level being played, the player's eye and gun.

use glam::Vec2;

use super::{InputCmd, Weapon, interaction, movement};
use crate::{
    renderer::ClickRegistry,
    world::{Camera, Level, Sprite},
};

#[derive(Clone, Debug)]
pub struct PlayState {
    pub level: Level,
    pub camera: Camera,
    pub weapon: Weapon,
}

impl PlayState {
    pub fn new(level: Level) -> Self {
        Self {
            camera: level.start,
            level,
            weapon: Weapon::default(),
        }
    }

    /// One simulation step: move, advance the gun, and pull the trigger if
    /// asked.  Returns `true` when a shot went off.
    pub fn step(&mut self, cmd: &InputCmd, dt: f64) -> bool {
        movement::apply(&mut self.camera, &self.level.grid, cmd, dt);
        self.weapon.tick(dt);
        cmd.fire && self.weapon.trigger()
    }

    /// Resolve a shot against last frame's clickables.
    pub fn shoot(&mut self, clickables: &mut ClickRegistry, crosshair: Vec2) -> Option<Sprite> {
        interaction::shoot(clickables, crosshair, &mut self.level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_level_start() {
        let st = PlayState::new(Level::default());
        assert_eq!(st.camera, st.level.start);
        assert!(st.weapon.is_ready());
    }

    #[test]
    fn fire_goes_through_weapon_timer() {
        let mut st = PlayState::new(Level::default());
        let fire = InputCmd {
            fire: true,
            ..Default::default()
        };
        assert!(st.step(&fire, 0.01));
        assert!(!st.step(&fire, 0.01));
        assert!(!st.step(&InputCmd::default(), 0.01));
    }

    #[test]
    fn shot_pressed_between_tics_fires_on_next_tic() {
        use crate::sim::{DT, TicRunner};
        use std::time::Duration;

        let mut st = PlayState::new(Level::default());
        let mut sim = TicRunner::new();
        let mut pending = InputCmd::default();
        let dir = st.camera.dir;
        let mut fired = false;

        // frame 1: trigger and mouse move, but too little time for a tic
        pending.accumulate(&InputCmd {
            look: 20.0,
            fire: true,
            ..Default::default()
        });
        let half = Duration::from_secs_f64(DT / 2.0);
        assert_eq!(
            sim.advance(half, |dt| {
                fired |= st.step(&pending, dt);
                pending.consume();
            }),
            0
        );

        // frame 2: no new input, one tic runs
        pending.accumulate(&InputCmd::default());
        assert_eq!(
            sim.advance(half + half, |dt| {
                fired |= st.step(&pending, dt);
                pending.consume();
            }),
            1
        );
        assert!(fired);
        assert!(st.camera.dir != dir, "look delta was dropped");
        assert_eq!(pending, InputCmd::default());
    }

    #[test]
    fn walking_stays_inside_the_map() {
        let mut st = PlayState::new(Level::default());
        let cmd = InputCmd {
            forward: 1.0,
            ..Default::default()
        };
        for _ in 0..600 {
            st.step(&cmd, 1.0 / 60.0);
        }
        let p = st.camera.pos;
        assert!(st.level.grid.is_empty(p.x.floor() as i32, p.y.floor() as i32));
    }
}
