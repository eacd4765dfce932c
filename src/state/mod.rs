pub mod coordinator;
pub mod palette;
pub mod random;
pub mod registry;
#[cfg(test)]
pub mod testing;

pub use coordinator::{DebounceTimer, VotingCoordinator};
pub use random::{RandomSource, SeededRandom};
pub use registry::MarkerRenderer;
