pub mod gauss_seidel;

pub use gauss_seidel::{ConvergenceStatus, GaussSeidelSolver, SolverConfig, YearConvergence};
