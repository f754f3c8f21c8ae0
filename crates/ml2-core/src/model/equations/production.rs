//! Production block: TFP trend, capital accumulation, Cobb-Douglas output,
//! potential output and the capacity indicators derived from it.

use super::{Equation, EquationKind};
use crate::model::panel::Panel;
use crate::model::params::Ml2Params;
use crate::model::Year;

/// `TFP = TFP[-1] * (1 + g_tfp)`
fn tfp(panel: &Panel, t: Year, p: &Ml2Params) -> f64 {
    panel.lag("TFP_", t) * (1.0 + p.tfp_growth)
}

/// `K = IF + (1 - delta) * K[-1]`
fn capital(panel: &Panel, t: Year, p: &Ml2Params) -> f64 {
    panel.get("IF_", t) + (1.0 - p.delta) * panel.lag("K_", t)
}

/// Cobb-Douglas value added `Y = TFP * K^(1-alpha) * LH^alpha`; falls back
/// to the lag when any factor is non-positive.
fn output(panel: &Panel, t: Year, p: &Ml2Params) -> f64 {
    let tfp = panel.get("TFP_", t);
    let k = panel.get("K_", t);
    let lh = panel.get("LH_", t);
    if k <= 0.0 || lh <= 0.0 || tfp <= 0.0 {
        return panel.lag("Y_", t);
    }
    tfp * k.powf(1.0 - p.alpha) * lh.powf(p.alpha)
}

/// Potential output from trend factors and structural employment
/// `L* = (1 - nairu) * NAT - NG`, holding hours per worker at the current
/// LH/L ratio.
fn potential_output(panel: &Panel, t: Year, p: &Ml2Params) -> f64 {
    let tfp = panel.get("TFP_", t);
    let k = panel.get("K_", t);
    let nat = panel.get("NAT_", t);
    let ng = panel.get("NG_", t);
    let l_star = (1.0 - p.nairu) * nat - ng;
    let lh_star = l_star * panel.get("LH_", t) / panel.get("L_", t).max(1.0);
    if k <= 0.0 || lh_star <= 0.0 {
        return panel.lag("YSTAR_", t);
    }
    tfp * k.powf(1.0 - p.alpha) * lh_star.powf(p.alpha)
}

/// `YGAP = (Y - YSTAR) / YSTAR`
fn output_gap(panel: &Panel, t: Year, _p: &Ml2Params) -> f64 {
    let ystar = panel.get("YSTAR_", t);
    if ystar == 0.0 {
        return 0.0;
    }
    (panel.get("Y_", t) - ystar) / ystar
}

/// Capacity utilisation `ZKF = Y / YSTAR`, bounded to [0.80, 1.10].
fn capacity_utilisation(panel: &Panel, t: Year, _p: &Ml2Params) -> f64 {
    let ystar = panel.get("YSTAR_", t);
    if ystar == 0.0 {
        return 1.0;
    }
    (panel.get("Y_", t) / ystar).clamp(0.80, 1.10)
}

pub(crate) fn equations() -> Vec<Equation> {
    use EquationKind::*;
    vec![
        Equation::new("TFP_", Technical, &[], tfp),
        Equation::new("K_", Identity, &["IF_"], capital),
        Equation::new("Y_", Behavioral, &["TFP_", "K_", "LH_"], output),
        Equation::new("YSTAR_", Technical, &["TFP_", "K_", "NAT_", "NG_"], potential_output),
        Equation::new("YGAP_", Identity, &["Y_", "YSTAR_"], output_gap),
        Equation::new("ZKF_", Identity, &["Y_", "YSTAR_"], capacity_utilisation),
    ]
}
