pub mod baseline;
pub mod engine;
pub mod model;
pub mod output;
pub mod solver;

pub use baseline::{BaselineError, BaselineLoader};
pub use engine::{EngineError, SimulationEngine};
pub use model::panel::Panel;
pub use model::params::Ml2Params;
pub use model::registry::EquationRegistry;
pub use model::Year;
pub use output::{KeyIndicators, SimulationOutput};
pub use solver::{ConvergenceStatus, GaussSeidelSolver, SolverConfig, YearConvergence};
