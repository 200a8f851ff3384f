pub mod logging;
pub mod renderer;
pub mod sim;
pub mod world;
