//! Policy instrument catalogue, validation and write-through.
//!
//! Instruments are exogenous columns (`*_X`) the equations read directly.
//! Three of them additionally map onto a model variable the pre-recursive
//! phase would otherwise derive from the parameter bundle.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::panel::Panel;
use crate::model::Year;

/// Declaration of one policy lever.
#[derive(Debug, Clone, Serialize)]
pub struct InstrumentSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    pub default: f64,
    pub min: f64,
    pub max: f64,
    pub description: &'static str,
}

/// The static instrument catalogue.
pub const INSTRUMENTS: &[InstrumentSpec] = &[
    InstrumentSpec {
        key: "VIG_X",
        label: "Public Investments",
        unit: "mln EUR (change)",
        default: 0.0,
        min: -2000.0,
        max: 6000.0,
        description: "Change in public investment expenditure (millions EUR, constant prices)",
    },
    InstrumentSpec {
        key: "ITPC0R_X",
        label: "VAT Rate",
        unit: "% (level)",
        default: 21.0,
        min: 15.0,
        max: 27.0,
        description: "Standard VAT rate on consumption (%)",
    },
    InstrumentSpec {
        key: "DTH_X",
        label: "Income Tax Receipts",
        unit: "mln EUR (change)",
        default: 0.0,
        min: -10000.0,
        max: 10000.0,
        description: "Change in personal income tax receipts (millions EUR)",
    },
    InstrumentSpec {
        key: "CSSFR_X",
        label: "Employer SSC Rate",
        unit: "% of wages (level)",
        default: 30.0,
        min: 25.0,
        max: 40.0,
        description: "Employer social security contribution rate (% of gross wages)",
    },
    InstrumentSpec {
        key: "CSSHR_X",
        label: "Employee SSC Rate",
        unit: "% of wages (level)",
        default: 13.0,
        min: 10.0,
        max: 20.0,
        description: "Employee social security contribution rate (% of gross wages)",
    },
    InstrumentSpec {
        key: "TGH_X",
        label: "Transfers to Households",
        unit: "% (growth rate)",
        default: 0.0,
        min: -5.0,
        max: 5.0,
        description: "Additional growth rate of transfers to households (%, constant prices)",
    },
    InstrumentSpec {
        key: "WR_X",
        label: "Private Wage Correction",
        unit: "pp",
        default: 0.0,
        min: -2.0,
        max: 2.0,
        description: "Correction to private sector nominal wage growth (percentage points)",
    },
    InstrumentSpec {
        key: "WGRR_X",
        label: "Public Real Wage Growth",
        unit: "% p.a.",
        default: 0.0,
        min: -2.0,
        max: 5.0,
        description: "Real wage growth in the public sector (% per year)",
    },
    InstrumentSpec {
        key: "NG_X",
        label: "Public Employment",
        unit: "thousands (change)",
        default: 0.0,
        min: -40.0,
        max: 40.0,
        description: "Change in public sector employment (thousands of persons)",
    },
    InstrumentSpec {
        key: "ZX_X",
        label: "Indexation Correction",
        unit: "pp",
        default: 0.0,
        min: -2.0,
        max: 0.0,
        description: "Change in automatic wage indexation mechanism (percentage points)",
    },
];

/// Look up the spec for an instrument key.
pub fn spec(key: &str) -> Option<&'static InstrumentSpec> {
    INSTRUMENTS.iter().find(|i| i.key == key)
}

/// Baseline instrument values.
pub fn defaults() -> BTreeMap<String, f64> {
    INSTRUMENTS.iter().map(|i| (i.key.to_string(), i.default)).collect()
}

/// Validate a set of instrument values. Returns one human-readable
/// message per offending entry; an empty list means valid.
pub fn validate(values: &BTreeMap<String, f64>) -> Vec<String> {
    let mut errors = Vec::new();
    for (key, &val) in values {
        match spec(key) {
            None => errors.push(format!("Unknown instrument: {key}")),
            Some(s) if val < s.min || val > s.max => {
                errors.push(format!("{key}: {val} out of range [{}, {}]", s.min, s.max));
            }
            Some(_) => {}
        }
    }
    errors
}

/// Write instrument values into the panel for every simulation year,
/// adding the columns on first use, then write the three derived model
/// variables:
///
/// - `ITPC0R_X → ITPC0R_` (level in %)
/// - `CSSFR_X → CSSFR_ = CSSFR_X / 100` (fraction)
/// - `CSSHR_X → CSSHR_ = CSSHR_X / 100` (fraction)
///
/// The remaining instruments are read directly by the equations.
pub fn apply(panel: &mut Panel, values: &BTreeMap<String, f64>, sim_years: &[Year]) {
    for &t in sim_years {
        for (key, &val) in values {
            panel.add(key, 0.0);
            panel.set(key, t, val);
        }
        if let Some(&v) = values.get("ITPC0R_X") {
            panel.set("ITPC0R_", t, v);
        }
        if let Some(&v) = values.get("CSSFR_X") {
            panel.set("CSSFR_", t, v / 100.0);
        }
        if let Some(&v) = values.get("CSSHR_X") {
            panel.set("CSSHR_", t, v / 100.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_has_ten_instruments() {
        assert_eq!(INSTRUMENTS.len(), 10);
        assert!(spec("VIG_X").is_some());
        assert!(spec("ITPC0R_X").is_some());
        assert!(spec("BOGUS_X").is_none());
    }

    #[test]
    fn defaults_match_the_catalogue() {
        let d = defaults();
        assert_eq!(d.len(), 10);
        assert_eq!(d["ITPC0R_X"], 21.0);
        assert_eq!(d["CSSFR_X"], 30.0);
        assert_eq!(d["VIG_X"], 0.0);
    }

    #[test]
    fn validate_flags_unknown_keys_and_ranges() {
        let mut values = BTreeMap::new();
        values.insert("BOGUS".to_string(), 1.0);
        values.insert("VIG_X".to_string(), 999_999.0);
        values.insert("TGH_X".to_string(), 2.0);
        let errors = validate(&values);
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.contains("Unknown instrument: BOGUS")));
        assert!(errors.iter().any(|e| e.contains("VIG_X") && e.contains("out of range")));
    }

    #[test]
    fn validate_accepts_boundary_values() {
        let mut values = BTreeMap::new();
        values.insert("ITPC0R_X".to_string(), 27.0);
        values.insert("ZX_X".to_string(), -2.0);
        assert!(validate(&values).is_empty());
    }

    #[test]
    fn apply_writes_columns_and_derived_rates() {
        let mut panel = Panel::new(vec![2012, 2013, 2014]);
        for var in ["ITPC0R_", "CSSFR_", "CSSHR_"] {
            panel.add(var, 0.0);
        }
        let mut values = defaults();
        values.insert("ITPC0R_X".to_string(), 23.0);
        values.insert("CSSFR_X".to_string(), 32.0);
        apply(&mut panel, &values, &[2013, 2014]);

        assert_eq!(panel.get("ITPC0R_X", 2013), 23.0);
        assert_eq!(panel.get("ITPC0R_", 2014), 23.0);
        assert_eq!(panel.get("CSSFR_", 2013), 0.32);
        assert_eq!(panel.get("CSSHR_", 2013), 0.13);
        // lag base untouched
        assert_eq!(panel.get("ITPC0R_", 2012), 0.0);
    }
}
