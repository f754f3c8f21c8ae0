//! Price block: unit labour cost, the macro cost index, consumer prices,
//! the investment deflators, export prices and the import price trend.

use super::{opt, opt_lag, safe_exp, Equation, EquationKind};
use crate::model::panel::Panel;
use crate::model::params::Ml2Params;
use crate::model::Year;

/// `ULC = W * L / Y`
fn unit_labour_cost(panel: &Panel, t: Year, _p: &Ml2Params) -> f64 {
    let y = panel.get("Y_", t);
    if y == 0.0 {
        return panel.lag("ULC_", t);
    }
    panel.get("W_", t) * panel.get("L_", t) / y
}

/// `COST = cost_w * ULC + cost_pm * PM`
fn macro_cost(panel: &Panel, t: Year, p: &Ml2Params) -> f64 {
    let ulc = panel.get("ULC_", t);
    let pm = panel.get("PM_", t);
    p.cost_w * ulc + p.cost_pm * pm
}

/// Consumer prices: cost push, import prices, output gap, VAT changes and
/// an ECM to the cost index:
///
/// `dln(PC) = pc0 + pc1*dln(COST) + pc2*dln(PM) + pc3*YGAP
///          + pc4*[ln(PC) - pc5*ln(COST)][-1] + pc_vat*d(ITPC0R/100)`
fn consumer_price(panel: &Panel, t: Year, p: &Ml2Params) -> f64 {
    let pc_prev = panel.lag("PC_", t);
    if pc_prev <= 0.0 {
        return pc_prev;
    }
    let dln_cost = panel.dln("COST_", t);
    let dln_pm = if panel.has("PM_") { panel.dln("PM_", t) } else { p.pm_growth };
    let ygap = panel.get("YGAP_", t);

    let cost_1 = panel.lag("COST_", t);
    let ecm = if pc_prev > 0.0 && cost_1 > 0.0 {
        pc_prev.ln() - p.pc5 * cost_1.ln()
    } else {
        0.0
    };

    let vat = opt(panel, "ITPC0R_", t, p.vat_rate * 100.0);
    let vat_1 = opt_lag(panel, "ITPC0R_", t, p.vat_rate * 100.0);
    let d_vat = (vat - vat_1) / 100.0;

    let dln_pc = p.pc0
        + p.pc1 * dln_cost
        + p.pc2 * dln_pm
        + p.pc3 * ygap
        + p.pc4 * ecm
        + p.pc_vat * d_vat;
    pc_prev * safe_exp(dln_pc)
}

/// Shared deflator form: cost push, import prices and (optionally) an ECM
/// back to the cost index.
fn deflator(panel: &Panel, t: Year, p: &Ml2Params, name: &str, c_cost: f64, c_pm: f64, c_ecm: f64) -> f64 {
    let prev = panel.lag(name, t);
    if prev <= 0.0 {
        return prev;
    }
    let dln_cost = panel.dln("COST_", t);
    let dln_pm = if panel.has("PM_") { panel.dln("PM_", t) } else { p.pm_growth };
    let cost_1 = panel.lag("COST_", t);
    let ecm = if prev > 0.0 && cost_1 > 0.0 {
        prev.ln() - cost_1.ln()
    } else {
        0.0
    };
    prev * safe_exp(c_cost * dln_cost + c_pm * dln_pm + c_ecm * ecm)
}

fn business_investment_deflator(panel: &Panel, t: Year, p: &Ml2Params) -> f64 {
    deflator(panel, t, p, "PIF_", p.pif1, p.pif2, p.pif3)
}

fn housing_investment_deflator(panel: &Panel, t: Year, p: &Ml2Params) -> f64 {
    deflator(panel, t, p, "PIH_", p.pih1, p.pih2, p.pih3)
}

/// Public investment deflator follows the cost index with no level
/// correction.
fn public_investment_deflator(panel: &Panel, t: Year, p: &Ml2Params) -> f64 {
    let prev = panel.lag("PIG_", t);
    if prev <= 0.0 {
        return prev;
    }
    let dln_cost = panel.dln("COST_", t);
    let dln_pm = if panel.has("PM_") { panel.dln("PM_", t) } else { p.pm_growth };
    prev * safe_exp(p.pig1 * dln_cost + p.pig2 * dln_pm)
}

/// Export prices arbitrate between domestic costs and foreign competitor
/// prices: `dln(PX) = px1*dln(COST) + px2*dln(PCOMP)
///                  + px3*[ln(PX) - ln(PCOMP)][-1]`
fn export_price(panel: &Panel, t: Year, p: &Ml2Params) -> f64 {
    let px_prev = panel.lag("PX_", t);
    if px_prev <= 0.0 {
        return px_prev;
    }
    let dln_cost = panel.dln("COST_", t);
    let dln_pcomp = if panel.has("PCOMP_") { panel.dln("PCOMP_", t) } else { p.pcomp_growth };
    let pcomp_1 = opt_lag(panel, "PCOMP_", t, 1.0);
    let ecm = if px_prev > 0.0 && pcomp_1 > 0.0 {
        px_prev.ln() - pcomp_1.ln()
    } else {
        0.0
    };
    px_prev * safe_exp(p.px1 * dln_cost + p.px2 * dln_pcomp + p.px3 * ecm)
}

/// Import prices are an exogenous trend.
fn import_price(panel: &Panel, t: Year, p: &Ml2Params) -> f64 {
    panel.lag("PM_", t) * (1.0 + p.pm_growth)
}

pub(crate) fn equations() -> Vec<Equation> {
    use EquationKind::*;
    vec![
        Equation::new("ULC_", Identity, &["W_", "L_", "Y_"], unit_labour_cost),
        Equation::new("COST_", Identity, &["ULC_", "PM_"], macro_cost),
        Equation::new(
            "PC_",
            Behavioral,
            &["COST_", "PM_", "YGAP_", "ITPC0R_"],
            consumer_price,
        ),
        Equation::new("PIF_", Behavioral, &["COST_", "PM_"], business_investment_deflator),
        Equation::new("PIH_", Behavioral, &["COST_", "PM_"], housing_investment_deflator),
        Equation::new("PIG_", Technical, &["COST_", "PM_"], public_investment_deflator),
        Equation::new("PX_", Behavioral, &["COST_", "PCOMP_"], export_price),
        Equation::new("PM_", Technical, &[], import_price),
    ]
}
