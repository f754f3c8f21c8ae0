//! Labour market block: labour demand, employment, unemployment and the
//! private/public wage equations.

use super::{opt, safe_exp, Equation, EquationKind};
use crate::model::panel::Panel;
use crate::model::params::Ml2Params;
use crate::model::Year;

/// Labour demand (hours), ECM on output and the Cobb-Douglas residual:
///
/// `dln(LH) = lh0 + lh1*dln(Y)
///          + lh2*[ln(Y) - (1-alpha)*ln(K) - ln(TFP) - alpha*ln(LH)][-1]`
fn labour_hours(panel: &Panel, t: Year, p: &Ml2Params) -> f64 {
    let lh_prev = panel.lag("LH_", t);
    if lh_prev <= 0.0 {
        return lh_prev;
    }
    let dln_y = panel.dln("Y_", t);

    let y_1 = panel.lag("Y_", t);
    let k_1 = panel.lag("K_", t);
    let tfp_1 = panel.lag("TFP_", t);
    let ecm = if y_1 > 0.0 && k_1 > 0.0 && tfp_1 > 0.0 && lh_prev > 0.0 {
        y_1.ln() - (1.0 - p.alpha) * k_1.ln() - tfp_1.ln() - p.alpha * lh_prev.ln()
    } else {
        0.0
    };

    lh_prev * safe_exp(p.lh0 + p.lh1 * dln_y + p.lh2 * ecm)
}

/// Employment in persons tracks hours growth (hours per worker treated as
/// a stable ratio).
fn employment(panel: &Panel, t: Year, _p: &Ml2Params) -> f64 {
    let lh = panel.get("LH_", t);
    let lh_prev = panel.lag("LH_", t);
    let l_prev = panel.lag("L_", t);
    if lh_prev == 0.0 || l_prev == 0.0 {
        return l_prev;
    }
    l_prev * (lh / lh_prev)
}

/// `U = NAT - L - NG`
fn unemployment(panel: &Panel, t: Year, _p: &Ml2Params) -> f64 {
    panel.get("NAT_", t) - panel.get("L_", t) - panel.get("NG_", t)
}

/// `UR = U / NAT`
fn unemployment_rate(panel: &Panel, t: Year, _p: &Ml2Params) -> f64 {
    let nat = panel.get("NAT_", t);
    if nat == 0.0 {
        return 0.0;
    }
    panel.get("U_", t) / nat
}

/// Private sector wages: indexation + productivity + Phillips curve +
/// wage share convergence, plus the two wage instruments:
///
/// `dln(W) = w0 + w1*dln(PC) + w2*dln(Y/LH) + w3*(UR - nairu)
///         + w4*(WS[-1] - w5) + WR_X/100 + ZX_X/100`
fn private_wage(panel: &Panel, t: Year, p: &Ml2Params) -> f64 {
    let w_prev = panel.lag("W_", t);
    if w_prev <= 0.0 {
        return w_prev;
    }
    let dln_pc = panel.dln("PC_", t);

    let y = panel.get("Y_", t);
    let lh = panel.get("LH_", t);
    let y_1 = panel.lag("Y_", t);
    let lh_1 = panel.lag("LH_", t);
    let dln_prod = if y > 0.0 && lh > 0.0 && y_1 > 0.0 && lh_1 > 0.0 {
        (y / lh).ln() - (y_1 / lh_1).ln()
    } else {
        0.0
    };

    let ur_gap = panel.get("UR_", t) - p.nairu;

    let l_1 = panel.lag("L_", t);
    let pc_1 = panel.lag("PC_", t);
    let ws_1 = if y_1 > 0.0 && pc_1 > 0.0 {
        (w_prev * l_1) / (pc_1 * y_1 * 1000.0)
    } else {
        p.w5
    };

    let mut dln_w = p.w0
        + p.w1 * dln_pc
        + p.w2 * dln_prod
        + p.w3 * ur_gap
        + p.w4 * (ws_1 - p.w5);
    dln_w += opt(panel, "WR_X", t, 0.0) / 100.0;
    dln_w += opt(panel, "ZX_X", t, 0.0) / 100.0;

    w_prev * safe_exp(dln_w)
}

/// Public wages: indexed to the CPI plus the exogenous real growth
/// instrument, `WG = WG[-1] * exp(dln(PC) + WGRR_X/100)`.
fn public_wage(panel: &Panel, t: Year, _p: &Ml2Params) -> f64 {
    let wg_prev = panel.lag("WG_", t);
    let dln_pc = panel.dln("PC_", t);
    let wgrr = opt(panel, "WGRR_X", t, 0.0);
    wg_prev * safe_exp(dln_pc + wgrr / 100.0)
}

pub(crate) fn equations() -> Vec<Equation> {
    use EquationKind::*;
    vec![
        Equation::new("LH_", Behavioral, &["Y_", "K_", "TFP_"], labour_hours),
        Equation::new("L_", Identity, &["LH_"], employment),
        Equation::new("U_", Identity, &["NAT_", "L_", "NG_"], unemployment),
        Equation::new("UR_", Identity, &["U_", "NAT_"], unemployment_rate),
        Equation::new("W_", Behavioral, &["PC_", "Y_", "LH_", "L_", "UR_"], private_wage),
        Equation::new("WG_", Technical, &["PC_"], public_wage),
    ]
}
