use std::time::{Duration, Instant};

pub const SIM_FPS: u32 = 60;
pub const DT: f64 = 1.0 / SIM_FPS as f64;
const TIC: Duration = Duration::from_micros(1_000_000 / SIM_FPS as u64);
/// Never run more than this many tics per pump, so a stalled frame does
/// not turn into a long catch-up burst.
const MAX_CATCH_UP: u32 = 8;

/// Fixed-rate accumulator that keeps simulation steps independent of the
/// render frame rate.
#[derive(Debug)]
pub struct TicRunner {
    last: Instant,
    backlog: Duration,
}

impl Default for TicRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl TicRunner {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            backlog: Duration::ZERO,
        }
    }

    /// Advance enough tics to synchronise simulation with real time.
    /// Returns the number of tics run.
    pub fn pump<F: FnMut(f64)>(&mut self, tick: F) -> u32 {
        let now = Instant::now();
        let elapsed = now - self.last;
        self.last = now;
        self.advance(elapsed, tick)
    }

    /// Add `elapsed` to the backlog and call `tick(DT)` once per whole tic.
    pub fn advance<F: FnMut(f64)>(&mut self, elapsed: Duration, mut tick: F) -> u32 {
        self.backlog += elapsed;
        let mut ran = 0;
        while self.backlog >= TIC {
            self.backlog -= TIC;
            if ran == MAX_CATCH_UP {
                log::debug!("sim fell behind, dropping {:?}", self.backlog + TIC);
                self.backlog = Duration::ZERO;
                break;
            }
            tick(DT);
            ran += 1;
        }
        ran
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_tics_carry_over() {
        let mut t = TicRunner::new();
        let mut n = 0;
        assert_eq!(t.advance(TIC / 2, |_| n += 1), 0);
        assert_eq!(t.advance(TIC / 2 + TIC, |_| n += 1), 2);
        assert_eq!(n, 2);
    }

    #[test]
    fn tick_receives_fixed_dt() {
        let mut t = TicRunner::new();
        let mut total = 0.0;
        t.advance(TIC * 3, |dt| total += dt);
        assert!((total - 3.0 * DT).abs() < 1e-12);
    }

    #[test]
    fn catch_up_is_bounded() {
        let mut t = TicRunner::new();
        assert_eq!(t.advance(Duration::from_secs(5), |_| {}), MAX_CATCH_UP);
        assert_eq!(t.advance(Duration::ZERO, |_| {}), 0);
    }
}
