//! Simulation output types.
//!
//! Everything here is plain serializable data. Maps are `BTreeMap`s so
//! that two runs with identical inputs serialize byte-identically: the
//! engine's determinism contract extends to the wire format.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::Year;
use crate::solver::YearConvergence;

/// Headline macro indicators over the simulation years.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyIndicators {
    pub years: Vec<Year>,
    /// GDP volume growth [% y/y]
    pub gdp_growth: Vec<f64>,
    /// CPI inflation [% y/y]
    pub inflation: Vec<f64>,
    /// Government balance over nominal GDP [%, negative = deficit]
    pub deficit_ratio: Vec<f64>,
    /// Unemployment rate [%]
    pub unemployment: Vec<f64>,
}

/// Complete result of one scenario run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationOutput {
    pub name: String,
    pub years: Vec<Year>,
    pub baseline: KeyIndicators,
    pub scenario: KeyIndicators,
    /// Per-variable impacts: percent deviation from baseline, or
    /// percentage points for ratio variables.
    pub impacts: BTreeMap<String, BTreeMap<Year, f64>>,
    /// Scenario levels for the headline variables, all years.
    pub levels: BTreeMap<String, BTreeMap<Year, f64>>,
    pub convergence: Vec<YearConvergence>,
    /// Resolved instrument values the scenario ran with.
    pub instruments: BTreeMap<String, f64>,
}
