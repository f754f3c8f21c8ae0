pub mod equations;
pub mod impact;
pub mod instruments;
pub mod panel;
pub mod params;
pub mod registry;

/// Calendar year. The first year of a panel is the lag base and is never
/// written by the solver.
pub type Year = i32;
