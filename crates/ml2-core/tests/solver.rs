//! Solver-level tests: convergence health on the baseline and the model
//! invariants that must hold for any solved panel.

use std::path::PathBuf;

use ml2_core::solver::ConvergenceStatus;
use ml2_core::{GaussSeidelSolver, Panel, SimulationEngine, SolverConfig, Year};

fn engine() -> SimulationEngine {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../data/baseline/baseline_variables.json");
    SimulationEngine::from_file(path).expect("baseline loads")
}

/// Solve a copy of the engine's baseline and hand it back.
fn solved_panel(engine: &SimulationEngine) -> (Panel, Vec<ml2_core::YearConvergence>) {
    let mut panel = engine.baseline().clone();
    let sim_years: Vec<Year> = panel.sim_years().to_vec();
    let solver = GaussSeidelSolver::new(SolverConfig::default());
    let reports = solver.solve(engine.registry(), engine.params(), &mut panel, &sim_years);
    (panel, reports)
}

#[test]
fn solver_converges_on_every_baseline_year() {
    let eng = engine();
    let (_, reports) = solved_panel(&eng);
    for report in &reports {
        assert_eq!(
            report.status,
            ConvergenceStatus::Converged,
            "year {} did not converge: {} iters, residual {:e}",
            report.year,
            report.iterations,
            report.max_residual
        );
    }
}

#[test]
fn solver_iteration_counts_stay_reasonable() {
    let eng = engine();
    let (_, reports) = solved_panel(&eng);
    for report in &reports {
        assert!(
            report.iterations < 500,
            "year {} took {} iterations",
            report.year,
            report.iterations
        );
    }
}

#[test]
fn solver_residuals_are_small_after_convergence() {
    let eng = engine();
    let (_, reports) = solved_panel(&eng);
    for report in &reports {
        assert!(
            report.max_residual < 1e-3,
            "year {} residual too large: {:e}",
            report.year,
            report.max_residual
        );
    }
}

#[test]
fn solved_values_are_finite_everywhere() {
    let eng = engine();
    let (panel, _) = solved_panel(&eng);
    for var in eng.registry().all_variables() {
        for &t in panel.sim_years() {
            let v = panel.get(var, t);
            assert!(v.is_finite(), "{var} at {t} is not finite: {v}");
        }
    }
}

#[test]
fn labour_market_identity_holds() {
    let eng = engine();
    let (panel, _) = solved_panel(&eng);
    for &t in panel.sim_years() {
        let gap = panel.get("U_", t) + panel.get("L_", t) + panel.get("NG_", t)
            - panel.get("NAT_", t);
        assert!(gap.abs() < 0.5, "U + L + NG != NAT at {t}: gap {gap:e}");
    }
}

#[test]
fn gdp_accounting_identity_holds() {
    let eng = engine();
    let (panel, _) = solved_panel(&eng);
    for &t in panel.sim_years() {
        let gap = panel.get("GDP_", t)
            - (panel.get("DD_", t) + panel.get("X_", t) - panel.get("M_", t));
        assert!(gap.abs() < 0.5, "GDP != DD + X - M at {t}: gap {gap:e}");
    }
}

#[test]
fn capacity_utilisation_stays_bounded() {
    let eng = engine();
    let (panel, _) = solved_panel(&eng);
    for &t in panel.sim_years() {
        let zkf = panel.get("ZKF_", t);
        assert!((0.80..=1.10).contains(&zkf), "ZKF at {t} out of bounds: {zkf}");
    }
}

#[test]
fn deficit_ratio_is_consistent_with_its_parts() {
    let eng = engine();
    let (panel, _) = solved_panel(&eng);
    for &t in panel.sim_years() {
        let gdpn = panel.get("GDPN_", t);
        assert!(gdpn != 0.0);
        let expected = panel.get("D_", t) / gdpn;
        let actual = panel.get("DR_", t);
        assert!(
            (actual - expected).abs() < 1e-9,
            "DR != D/GDPN at {t}: {actual} vs {expected}"
        );
    }
}

#[test]
fn solving_twice_gives_identical_trajectories() {
    let eng = engine();
    let (a, _) = solved_panel(&eng);
    let (b, _) = solved_panel(&eng);
    for var in eng.registry().all_variables() {
        for &t in a.sim_years() {
            assert_eq!(a.get(var, t), b.get(var, t), "{var} at {t} differs between runs");
        }
    }
}

#[test]
fn default_config_matches_the_contract() {
    let config = SolverConfig::default();
    assert_eq!(config.relaxation, 0.2);
    assert_eq!(config.eps, 1e-4);
    assert_eq!(config.max_iter, 1000);
}
