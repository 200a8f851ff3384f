mod input;
pub mod interaction;
pub mod movement;
mod state;
mod tic;
mod weapon;

pub use input::InputCmd;
pub use state::PlayState;
pub use tic::{DT, SIM_FPS, TicRunner};
pub use weapon::{SHOT_DELAY, SHOT_TIME, Weapon};
