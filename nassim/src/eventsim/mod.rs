pub mod scheduler;
pub mod simulation;

pub use self::scheduler::*;
pub use self::simulation::*;

/// Simulation time in whole seconds.
pub type Time = i64;
