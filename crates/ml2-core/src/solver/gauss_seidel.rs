//! Three-phase Gauss-Seidel solver.
//!
//! Per simulation year: one pre-recursive sweep writes the exogenous
//! trends, the interdependent block is iterated with under-relaxation
//! until the largest relative change in a sweep falls below tolerance,
//! then one post-recursive sweep writes the derived ratios.
//!
//! Sweeps are classical Gauss-Seidel, not Jacobi: each equation sees the
//! values already written earlier in the same sweep. Trajectories depend
//! on this, so the variable order is fixed by the registry.
//!
//! Non-convergence is reported, never raised: the caller gets one
//! [`YearConvergence`] per year and decides what to do with it.

use serde::{Deserialize, Serialize};

use crate::model::panel::Panel;
use crate::model::params::Ml2Params;
use crate::model::registry::EquationRegistry;
use crate::model::Year;

/// Outcome of the iterative phase for one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConvergenceStatus {
    Converged,
    MaxIterations,
    Diverged,
}

/// Per-year convergence report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearConvergence {
    pub year: Year,
    pub iterations: u32,
    pub max_residual: f64,
    pub status: ConvergenceStatus,
}

/// Solver tuning. The defaults are part of the model contract: changing
/// them changes observable convergence reports.
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    /// Under-relaxation weight on the freshly computed value
    pub relaxation: f64,
    /// Convergence tolerance on the largest relative change per sweep
    pub eps: f64,
    /// Iteration cap per year
    pub max_iter: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self { relaxation: 0.2, eps: 1e-4, max_iter: 1000 }
    }
}

/// Three-phase Gauss-Seidel solver over a panel.
#[derive(Debug, Clone, Default)]
pub struct GaussSeidelSolver {
    config: SolverConfig,
}

impl GaussSeidelSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve every equation for year `t` in place.
    pub fn solve_year(
        &self,
        registry: &EquationRegistry,
        params: &Ml2Params,
        panel: &mut Panel,
        t: Year,
    ) -> YearConvergence {
        // Phase 1: pre-recursive, exactly one pass
        for var in registry.pre_order() {
            if let Some(eq) = registry.get(var) {
                let val = eq.evaluate(panel, t, params);
                panel.set(var, t, val);
            }
        }

        // Phase 2: damped Gauss-Seidel on the interdependent block
        let relax = self.config.relaxation;
        let mut status = ConvergenceStatus::MaxIterations;
        let mut max_resid = 0.0f64;
        let mut iterations = 0u32;

        for it in 1..=self.config.max_iter {
            max_resid = 0.0;
            for var in registry.inter_order() {
                let Some(eq) = registry.get(var) else { continue };
                let old = panel.get(var, t);
                let new = eq.evaluate(panel, t, params);
                let relaxed = relax * new + (1.0 - relax) * old;
                panel.set(var, t, relaxed);

                let resid = if old.abs() > 1e-10 {
                    (relaxed - old).abs() / old.abs()
                } else {
                    (relaxed - old).abs()
                };
                max_resid = max_resid.max(resid);
            }
            iterations = it;
            if !max_resid.is_finite() {
                status = ConvergenceStatus::Diverged;
                break;
            }
            if max_resid < self.config.eps {
                status = ConvergenceStatus::Converged;
                break;
            }
        }

        // Phase 3: post-recursive diagnostics
        for var in registry.post_order() {
            if let Some(eq) = registry.get(var) {
                let val = eq.evaluate(panel, t, params);
                panel.set(var, t, val);
            }
        }

        tracing::debug!(
            year = t,
            iterations,
            max_residual = max_resid,
            status = ?status,
            "solved year"
        );
        YearConvergence { year: t, iterations, max_residual: max_resid, status }
    }

    /// Solve all years in calendar order. Order is mandatory: every
    /// equation reads lags, which must be the resolved previous year.
    pub fn solve(
        &self,
        registry: &EquationRegistry,
        params: &Ml2Params,
        panel: &mut Panel,
        years: &[Year],
    ) -> Vec<YearConvergence> {
        years
            .iter()
            .map(|&t| self.solve_year(registry, params, panel, t))
            .collect()
    }
}
