/// One frame's worth of player intent, built by the window layer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputCmd {
    pub forward: f64, // –1 … +1  (back / forward)
    pub strafe: f64,  // –1 … +1  (left / right)
    pub look: f64,    // horizontal look delta in pixels, + = right
    pub fire: bool,   // trigger pressed this frame
}

impl InputCmd {
    #[inline]
    pub fn is_moving(&self) -> bool {
        self.forward != 0.0 || self.strafe != 0.0 || self.look != 0.0
    }

    /// Fold a newer frame's command into one no tic has consumed yet.
    /// Held axes take the newer value; look deltas add up and a fire press
    /// is kept until [`consume`](Self::consume).
    pub fn accumulate(&mut self, newer: &InputCmd) {
        self.forward = newer.forward;
        self.strafe = newer.strafe;
        self.look += newer.look;
        self.fire |= newer.fire;
    }

    /// A tic used this command: drop the one-shot parts.
    pub fn consume(&mut self) {
        self.look = 0.0;
        self.fire = false;
    }
}
