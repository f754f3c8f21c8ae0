//! Impact calculation: signed scenario-minus-baseline differences.
//!
//! Level variables report percent deviation from baseline; ratio
//! variables report the absolute difference in percentage points.

use std::collections::BTreeMap;

use crate::model::panel::Panel;
use crate::model::Year;

/// Variables whose impact is an absolute difference in percentage points.
pub const ABSOLUTE_IMPACT_VARS: &[&str] = &["DR_", "UR_", "BR_", "TBR_", "YGAP_", "ZKF_"];

/// Compute per-variable, per-year impacts over the simulation years.
pub fn compute_impacts(
    baseline: &Panel,
    scenario: &Panel,
    variables: &[&str],
    sim_years: &[Year],
) -> BTreeMap<String, BTreeMap<Year, f64>> {
    let mut impacts = BTreeMap::new();
    for &var in variables {
        let mut per_year = BTreeMap::new();
        for &t in sim_years {
            let base = baseline.get(var, t);
            let scen = scenario.get(var, t);
            let impact = if ABSOLUTE_IMPACT_VARS.contains(&var) {
                (scen - base) * 100.0
            } else if base.abs() > 1e-10 {
                (scen - base) / base * 100.0
            } else {
                0.0
            };
            per_year.insert(t, impact);
        }
        impacts.insert(var.to_string(), per_year);
    }
    impacts
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn panels() -> (Panel, Panel) {
        let mut base = Panel::new(vec![2012, 2013]);
        base.add("GDP_", 0.0);
        base.set("GDP_", 2013, 200.0);
        base.add("UR_", 0.0);
        base.set("UR_", 2013, 0.085);
        base.add("ZERO_", 0.0);
        let mut scen = base.clone();
        scen.set("GDP_", 2013, 202.0);
        scen.set("UR_", 2013, 0.080);
        scen.set("ZERO_", 2013, 3.0);
        (base, scen)
    }

    #[test]
    fn level_variables_report_percent_deviation() {
        let (base, scen) = panels();
        let impacts = compute_impacts(&base, &scen, &["GDP_"], &[2013]);
        assert_relative_eq!(impacts["GDP_"][&2013], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn ratio_variables_report_percentage_points() {
        let (base, scen) = panels();
        let impacts = compute_impacts(&base, &scen, &["UR_"], &[2013]);
        assert_relative_eq!(impacts["UR_"][&2013], -0.5, epsilon = 1e-12);
    }

    #[test]
    fn zero_baseline_yields_zero_impact() {
        let (base, scen) = panels();
        let impacts = compute_impacts(&base, &scen, &["ZERO_"], &[2013]);
        assert_eq!(impacts["ZERO_"][&2013], 0.0);
    }
}
