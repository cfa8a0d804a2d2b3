mod door_coordinator;
mod maze_builder;
mod reachability;

pub use door_coordinator::{AnswerOutcome, DoorStateCoordinator, WallUpdate};
pub use maze_builder::{MazeBuilder, MazeBuilderConfig};
pub use reachability::ReachabilityAnalyzer;

use rand::{SeedableRng, rngs::StdRng};

pub(crate) struct RngHandler;

impl RngHandler {
    // A fixed seed replays the same maze and the same question order.
    pub fn rng(seed: Option<u64>) -> StdRng {
        match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        }
    }
}
