pub mod renderer;
pub mod setup;
pub mod timer;

pub use setup::setup_chooser;
