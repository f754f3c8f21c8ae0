//! Simulation engine: the orchestrator tying loader, registry, solver,
//! instruments and impacts together.
//!
//! The baseline panel is built once and treated as immutable afterwards;
//! every [`SimulationEngine::simulate`] call works on a private deep copy,
//! so concurrent callers can share one engine behind an `Arc` without
//! locking.

use std::collections::BTreeMap;
use std::path::Path;

use crate::baseline::{BaselineError, BaselineLoader};
use crate::model::instruments::{self, InstrumentSpec, INSTRUMENTS};
use crate::model::panel::Panel;
use crate::model::params::Ml2Params;
use crate::model::registry::EquationRegistry;
use crate::model::{impact, Year};
use crate::output::{KeyIndicators, SimulationOutput};
use crate::solver::{GaussSeidelSolver, SolverConfig, YearConvergence};

/// Headline variables whose scenario levels are returned in full.
const LEVEL_VARS: &[&str] = &[
    "GDP_", "C_", "IF_", "IH_", "IG_", "X_", "M_", "PC_", "W_", "L_", "U_", "UR_", "DR_", "BR_",
    "YDH_", "GDPN_", "K_", "PROD_", "ULC_", "GRECEIPTS_", "GEXPENSE_", "D_", "B_",
];

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Instrument validation failed; the message lists every offending key.
    #[error("Invalid instruments: {0}")]
    InvalidInstruments(String),
    #[error(transparent)]
    Baseline(#[from] BaselineError),
}

/// Loads the baseline once, then runs share-nothing scenario simulations
/// against it.
#[derive(Debug)]
pub struct SimulationEngine {
    params: Ml2Params,
    registry: EquationRegistry,
    solver: GaussSeidelSolver,
    baseline: Panel,
}

impl SimulationEngine {
    /// Build an engine from a baseline file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let panel = BaselineLoader::new(path.as_ref()).load()?;
        Ok(Self::new(panel))
    }

    /// Build an engine from an already-loaded baseline panel. Derived
    /// columns the solver needs are filled in here, once.
    pub fn new(mut baseline: Panel) -> Self {
        let params = Ml2Params::default();
        let registry = EquationRegistry::new();
        ensure_variables(&mut baseline, &registry, &params);
        Self {
            params,
            registry,
            solver: GaussSeidelSolver::new(SolverConfig::default()),
            baseline,
        }
    }

    pub fn params(&self) -> &Ml2Params {
        &self.params
    }

    pub fn registry(&self) -> &EquationRegistry {
        &self.registry
    }

    /// The immutable baseline panel.
    pub fn baseline(&self) -> &Panel {
        &self.baseline
    }

    /// Instrument catalogue, for the API surface.
    pub fn instrument_specs(&self) -> &'static [InstrumentSpec] {
        INSTRUMENTS
    }

    /// Baseline headline indicators, straight from the stored panel.
    pub fn baseline_indicators(&self) -> KeyIndicators {
        extract_indicators(&self.baseline, self.baseline.sim_years())
    }

    /// Run one scenario: merge instruments with defaults, validate, solve
    /// a private baseline copy and package impacts and levels.
    pub fn simulate(
        &self,
        overrides: &BTreeMap<String, f64>,
        name: &str,
    ) -> Result<SimulationOutput, EngineError> {
        let mut values = instruments::defaults();
        if !overrides.is_empty() {
            let errors = instruments::validate(overrides);
            if !errors.is_empty() {
                return Err(EngineError::InvalidInstruments(errors.join("; ")));
            }
            values.extend(overrides.iter().map(|(k, v)| (k.clone(), *v)));
        }

        let mut scenario = self.baseline.clone();
        let sim_years: Vec<Year> = scenario.sim_years().to_vec();

        instruments::apply(&mut scenario, &values, &sim_years);
        let convergence =
            self.solver.solve(&self.registry, &self.params, &mut scenario, &sim_years);

        let baseline_ind = extract_indicators(&self.baseline, &sim_years);
        let scenario_ind = extract_indicators(&scenario, &sim_years);

        let all_vars = self.registry.all_variables();
        let impacts = impact::compute_impacts(&self.baseline, &scenario, &all_vars, &sim_years);
        let levels = scenario.to_map(LEVEL_VARS);

        tracing::info!(
            scenario = name,
            years = sim_years.len(),
            converged = convergence
                .iter()
                .filter(|c| c.status == crate::solver::ConvergenceStatus::Converged)
                .count(),
            "simulation finished"
        );

        Ok(SimulationOutput {
            name: name.to_string(),
            years: sim_years,
            baseline: baseline_ind,
            scenario: scenario_ind,
            impacts,
            levels,
            convergence: convergence.into_iter().map(round_report).collect(),
            instruments: values,
        })
    }
}

fn extract_indicators(panel: &Panel, sim_years: &[Year]) -> KeyIndicators {
    KeyIndicators {
        years: sim_years.to_vec(),
        gdp_growth: sim_years.iter().map(|&t| panel.grt("GDP_", t)).collect(),
        inflation: sim_years.iter().map(|&t| panel.grt("PC_", t)).collect(),
        deficit_ratio: sim_years.iter().map(|&t| panel.get("DR_", t) * 100.0).collect(),
        unemployment: sim_years.iter().map(|&t| panel.get("UR_", t) * 100.0).collect(),
    }
}

/// Residuals are rounded to 8 decimals in the packaged output so exports
/// stay stable across platforms.
fn round_report(mut report: YearConvergence) -> YearConvergence {
    report.max_residual = (report.max_residual * 1e8).round() / 1e8;
    report
}

/// Fill in derived columns a raw baseline may lack. A column is added if
/// missing; a cell is recomputed only when it is exactly 0.0. Note the
/// consequence: a true zero in a covered column would be overwritten.
/// Idempotent, runs once at engine construction.
fn ensure_variables(panel: &mut Panel, registry: &EquationRegistry, params: &Ml2Params) {
    let years: Vec<Year> = panel.years().to_vec();

    let ensure = |panel: &mut Panel, var: &str, f: &dyn Fn(&Panel, Year) -> f64| {
        panel.add(var, 0.0);
        for &t in &years {
            if panel.get(var, t) == 0.0 {
                let value = f(panel, t);
                panel.set(var, t, value);
            }
        }
    };

    ensure(panel, "Y_", &|p, t| p.get("GDP_", t));

    ensure(panel, "DD_", &|p, t| {
        p.get("C_", t)
            + p.get("IF_", t)
            + p.get("IH_", t)
            + p.get("IG_", t)
            + p.get("CG_", t)
            + p.get("DS_", t)
    });

    ensure(panel, "RREAL_", &|_, _| params.r_nominal - 0.015);

    ensure(panel, "RMORT_", &|p, t| {
        if p.has("RNOM_") {
            p.get("RNOM_", t) + 0.015
        } else {
            0.045
        }
    });

    ensure(panel, "PROFIT_", &|p, t| {
        let y = p.get("GDP_", t);
        let w = p.get("W_", t);
        let l = p.get("L_", t);
        let pc = p.get("PC_", t);
        let k = p.get("K_", t);
        if pc * k > 0.0 {
            (y - w * l / 1000.0) / (pc * k)
        } else {
            0.06
        }
    });

    ensure(panel, "ULC_", &|p, t| {
        let y = p.get("GDP_", t);
        if y > 0.0 {
            p.get("W_", t) * p.get("L_", t) / y
        } else {
            0.0
        }
    });

    ensure(panel, "COST_", &|p, t| {
        let ulc = p.get("ULC_", t);
        let pm = if p.has("PM_") { p.get("PM_", t) } else { 1.0 };
        params.cost_w * ulc + params.cost_pm * pm
    });

    for var in registry.all_variables() {
        panel.add(var, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_panel() -> Panel {
        let mut panel = Panel::new(vec![2012, 2013]);
        for (var, v0, v1) in [
            ("GDP_", 100.0, 102.0),
            ("C_", 60.0, 61.0),
            ("IF_", 20.0, 21.0),
            ("IH_", 5.0, 5.0),
            ("IG_", 3.0, 3.0),
            ("CG_", 10.0, 10.0),
            ("DS_", 1.0, 1.0),
            ("W_", 0.1, 0.11),
            ("L_", 3000.0, 3010.0),
            ("PC_", 1.0, 1.01),
            ("K_", 300.0, 305.0),
            ("RNOM_", 0.03, 0.03),
        ] {
            panel.add(var, 0.0);
            panel.set(var, 2012, v0);
            panel.set(var, 2013, v1);
        }
        panel
    }

    #[test]
    fn ensure_fills_missing_columns_and_zero_cells() {
        let mut panel = raw_panel();
        let registry = EquationRegistry::new();
        let params = Ml2Params::default();
        ensure_variables(&mut panel, &registry, &params);

        // Y_ falls back to GDP_
        assert_eq!(panel.get("Y_", 2013), 102.0);
        // DD_ sums demand components
        assert_eq!(panel.get("DD_", 2012), 99.0);
        // RMORT_ = RNOM_ + spread
        assert!((panel.get("RMORT_", 2012) - 0.045).abs() < 1e-12);
        // every registry variable now exists
        for var in registry.all_variables() {
            assert!(panel.has(var), "{var} missing after ensure pass");
        }
    }

    #[test]
    fn ensure_is_idempotent() {
        let mut panel = raw_panel();
        let registry = EquationRegistry::new();
        let params = Ml2Params::default();
        ensure_variables(&mut panel, &registry, &params);
        let snapshot = panel.to_map(&["Y_", "DD_", "RREAL_", "COST_"]);
        ensure_variables(&mut panel, &registry, &params);
        assert_eq!(snapshot, panel.to_map(&["Y_", "DD_", "RREAL_", "COST_"]));
    }
}
