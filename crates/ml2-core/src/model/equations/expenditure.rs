//! Behavioral expenditure block: consumption, business and housing
//! investment, export and import volumes. All five are error-correction
//! models in log-change form.

use super::{opt, opt_lag, safe_exp, Equation, EquationKind};
use crate::model::panel::Panel;
use crate::model::params::Ml2Params;
use crate::model::Year;

/// Private consumption:
///
/// `dln(C) = c0 + c1*dln(YDH/PC) + c2*d(RREAL) + c3*d(UR)
///         + c4*[ln(C) - c5*ln(YDH/PC)][-1] + c6*dln(C)[-1]`
fn consumption(panel: &Panel, t: Year, p: &Ml2Params) -> f64 {
    let c_prev = panel.lag("C_", t);
    if c_prev <= 0.0 {
        return c_prev;
    }
    let ydh = panel.get("YDH_", t);
    let pc = panel.get("PC_", t);
    let ydh_1 = panel.lag("YDH_", t);
    let pc_1 = panel.lag("PC_", t);
    let dln_rydi = if ydh > 0.0 && pc > 0.0 && ydh_1 > 0.0 && pc_1 > 0.0 {
        (ydh / pc).ln() - (ydh_1 / pc_1).ln()
    } else {
        0.0
    };

    let d_rreal = opt(panel, "RREAL_", t, 0.0) - opt_lag(panel, "RREAL_", t, 0.0);
    let d_ur = panel.d("UR_", t);

    let ecm = if c_prev > 0.0 && ydh_1 > 0.0 && pc_1 > 0.0 {
        c_prev.ln() - p.c5 * (ydh_1 / pc_1).ln()
    } else {
        0.0
    };

    // second lag is unavailable in the first simulation year
    let c_2 = if panel.contains_year(t - 2) { panel.lag_n("C_", t, 2) } else { c_prev };
    let dln_c_lag = if c_2 > 0.0 && c_prev > 0.0 {
        c_prev.ln() - c_2.ln()
    } else {
        0.0
    };

    let dln_c = p.c0
        + p.c1 * dln_rydi
        + p.c2 * d_rreal
        + p.c3 * d_ur
        + p.c4 * ecm
        + p.c6 * dln_c_lag;
    c_prev * safe_exp(dln_c)
}

/// Business investment: accelerator, profitability, real rate, capacity
/// utilisation and an ECM to output:
///
/// `dln(IF) = if0 + if1*dln(Y) + if2*d(PROFIT) + if3*d(RREAL)
///          + if4*d(ZKF) + if5*[ln(IF) - if6*ln(Y)][-1]`
fn business_investment(panel: &Panel, t: Year, p: &Ml2Params) -> f64 {
    let if_prev = panel.lag("IF_", t);
    if if_prev <= 0.0 {
        return if_prev;
    }
    let dln_y = panel.dln("Y_", t);
    let d_profit = opt(panel, "PROFIT_", t, 0.0) - opt_lag(panel, "PROFIT_", t, 0.0);
    let d_rreal = opt(panel, "RREAL_", t, 0.0) - opt_lag(panel, "RREAL_", t, 0.0);
    let d_zkf = panel.get("ZKF_", t) - panel.lag("ZKF_", t);

    let y_1 = panel.lag("Y_", t);
    let ecm = if if_prev > 0.0 && y_1 > 0.0 {
        if_prev.ln() - p.if6 * y_1.ln()
    } else {
        0.0
    };

    let dln_if = p.if0
        + p.if1 * dln_y
        + p.if2 * d_profit
        + p.if3 * d_rreal
        + p.if4 * d_zkf
        + p.if5 * ecm;
    if_prev * safe_exp(dln_if)
}

/// Housing investment on real income and the mortgage rate:
///
/// `dln(IH) = ih0 + ih1*dln(YDH/PC) + ih2*d(RMORT)
///          + ih3*[ln(IH) - ih4*ln(YDH/PC)][-1]`
fn housing_investment(panel: &Panel, t: Year, p: &Ml2Params) -> f64 {
    let ih_prev = panel.lag("IH_", t);
    if ih_prev <= 0.0 {
        return ih_prev;
    }
    let ydh = panel.get("YDH_", t);
    let pc = panel.get("PC_", t);
    let ydh_1 = panel.lag("YDH_", t);
    let pc_1 = panel.lag("PC_", t);
    let dln_rydi = if ydh > 0.0 && pc > 0.0 && ydh_1 > 0.0 && pc_1 > 0.0 {
        (ydh / pc).ln() - (ydh_1 / pc_1).ln()
    } else {
        0.0
    };

    let d_rmort = opt(panel, "RMORT_", t, 0.0) - opt_lag(panel, "RMORT_", t, 0.0);

    let ecm = if ih_prev > 0.0 && ydh_1 > 0.0 && pc_1 > 0.0 {
        ih_prev.ln() - p.ih4 * (ydh_1 / pc_1).ln()
    } else {
        0.0
    };

    let dln_ih = p.ih0 + p.ih1 * dln_rydi + p.ih2 * d_rmort + p.ih3 * ecm;
    ih_prev * safe_exp(dln_ih)
}

/// Export volumes on foreign demand and relative export prices:
///
/// `dln(X) = x0 + x1*dln(XWORLD) + x2*dln(PX/PCOMP)
///         + x3*[ln(X) - x4*ln(XWORLD) - x5*ln(PX/PCOMP)][-1]`
fn export_volume(panel: &Panel, t: Year, p: &Ml2Params) -> f64 {
    let x_prev = panel.lag("X_", t);
    if x_prev <= 0.0 {
        return x_prev;
    }
    let dln_xw = if panel.has("XWORLD_") { panel.dln("XWORLD_", t) } else { p.world_growth };

    let px = panel.get("PX_", t);
    let pcomp = opt(panel, "PCOMP_", t, 1.0);
    let px_1 = panel.lag("PX_", t);
    let pcomp_1 = opt_lag(panel, "PCOMP_", t, 1.0);
    let dln_relpx = if px > 0.0 && pcomp > 0.0 && px_1 > 0.0 && pcomp_1 > 0.0 {
        (px / pcomp).ln() - (px_1 / pcomp_1).ln()
    } else {
        0.0
    };

    let xw_1 = opt_lag(panel, "XWORLD_", t, 1.0);
    let ecm = if x_prev > 0.0 && xw_1 > 0.0 && px_1 > 0.0 && pcomp_1 > 0.0 {
        x_prev.ln() - p.x4 * xw_1.ln() - p.x5 * (px_1 / pcomp_1).ln()
    } else {
        0.0
    };

    let dln_x = p.x0 + p.x1 * dln_xw + p.x2 * dln_relpx + p.x3 * ecm;
    x_prev * safe_exp(dln_x)
}

/// Import volumes on domestic demand and relative import prices:
///
/// `dln(M) = m0 + m1*dln(DD) + m2*dln(PM/PC)
///         + m3*[ln(M) - m4*ln(DD) - m5*ln(PM/PC)][-1]`
fn import_volume(panel: &Panel, t: Year, p: &Ml2Params) -> f64 {
    let m_prev = panel.lag("M_", t);
    if m_prev <= 0.0 {
        return m_prev;
    }
    let dln_dd = if panel.has("DD_") { panel.dln("DD_", t) } else { 0.0 };

    let pm = opt(panel, "PM_", t, 1.0);
    let pc = panel.get("PC_", t);
    let pm_1 = opt_lag(panel, "PM_", t, 1.0);
    let pc_1 = panel.lag("PC_", t);
    let dln_relpm = if pm > 0.0 && pc > 0.0 && pm_1 > 0.0 && pc_1 > 0.0 {
        (pm / pc).ln() - (pm_1 / pc_1).ln()
    } else {
        0.0
    };

    let dd_1 = opt_lag(panel, "DD_", t, 1.0);
    let ecm = if m_prev > 0.0 && dd_1 > 0.0 && pm_1 > 0.0 && pc_1 > 0.0 {
        m_prev.ln() - p.m4 * dd_1.ln() - p.m5 * (pm_1 / pc_1).ln()
    } else {
        0.0
    };

    let dln_m = p.m0 + p.m1 * dln_dd + p.m2 * dln_relpm + p.m3 * ecm;
    m_prev * safe_exp(dln_m)
}

pub(crate) fn equations() -> Vec<Equation> {
    use EquationKind::*;
    vec![
        Equation::new("C_", Behavioral, &["YDH_", "PC_", "UR_", "RREAL_"], consumption),
        Equation::new(
            "IF_",
            Behavioral,
            &["Y_", "PROFIT_", "RREAL_", "ZKF_"],
            business_investment,
        ),
        Equation::new("IH_", Behavioral, &["YDH_", "PC_", "RMORT_"], housing_investment),
        Equation::new("X_", Behavioral, &["XWORLD_", "PX_", "PCOMP_"], export_volume),
        Equation::new("M_", Behavioral, &["DD_", "PM_", "PC_"], import_volume),
    ]
}
