//! Gun timing.  A shot shows the muzzle flash for `SHOT_TIME` seconds and
//! locks the trigger for `SHOT_DELAY` seconds; both timers run together.

pub const SHOT_TIME: f64 = 0.1;
pub const SHOT_DELAY: f64 = 0.3;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Weapon {
    shot_time: f64,
    delay: f64,
    firing: bool,
}

impl Weapon {
    /// Muzzle flash is up.
    #[inline]
    pub fn is_firing(&self) -> bool {
        self.firing
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.shot_time <= 0.0 && self.delay <= 0.0
    }

    /// Pull the trigger.  Returns `true` when a shot actually went off.
    pub fn trigger(&mut self) -> bool {
        if !self.is_ready() {
            self.firing = false;
            return false;
        }
        self.shot_time = SHOT_TIME;
        self.delay = SHOT_DELAY;
        self.firing = true;
        true
    }

    /// Advance both timers by `dt` seconds.
    pub fn tick(&mut self, dt: f64) {
        if self.shot_time < 0.0 {
            self.firing = false;
        } else {
            self.shot_time -= dt;
        }
        if self.delay > 0.0 {
            self.delay -= dt;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_weapon_fires() {
        let mut w = Weapon::default();
        assert!(w.is_ready());
        assert!(w.trigger());
        assert!(w.is_firing());
    }

    #[test]
    fn flash_ends_after_shot_time() {
        let mut w = Weapon::default();
        w.trigger();
        w.tick(0.05);
        assert!(w.is_firing());
        w.tick(0.06);
        w.tick(0.01);
        assert!(!w.is_firing());
    }

    #[test]
    fn cannot_refire_until_delay_elapsed() {
        let mut w = Weapon::default();
        assert!(w.trigger());
        assert!(!w.trigger());
        assert!(!w.is_firing(), "a refused pull cancels the flash");

        w.tick(0.2);
        assert!(!w.trigger());
        w.tick(0.11);
        assert!(w.trigger());
    }
}
