//! Public finance block: receipts, expenditure, deficit, debt and their
//! GDP ratios.

use super::{opt, Equation, EquationKind};
use crate::model::panel::Panel;
use crate::model::params::Ml2Params;
use crate::model::Year;

/// Government receipts: income tax, VAT on nominal consumption, employer
/// and employee SSC on the wage bill, plus other revenue at 12% of
/// nominal GDP.
fn receipts(panel: &Panel, t: Year, p: &Ml2Params) -> f64 {
    let private_wb = panel.get("W_", t) * panel.get("L_", t) / 1000.0;
    let public_wb = panel.get("WG_", t) * panel.get("NG_", t) / 1000.0;
    let total_wb = private_wb + public_wb;

    let cssfr = opt(panel, "CSSFR_", t, p.css_emp_rate);
    let ssc_emp = total_wb * cssfr;

    let csshr = opt(panel, "CSSHR_", t, p.css_house_rate);
    let ssc_house = total_wb * csshr;

    let income_tax = total_wb * (1.0 - csshr) * 0.25 + opt(panel, "DTH_X", t, 0.0) / 1000.0;

    // VAT is levied inside the consumer price
    let vat_rate = opt(panel, "ITPC0R_", t, p.vat_rate * 100.0);
    let consumption_nom = panel.get("C_", t) * panel.get("PC_", t);
    let vat_revenue = consumption_nom * (vat_rate / 100.0) / (1.0 + vat_rate / 100.0);

    let other_revenue = panel.get("GDPN_", t) * 0.12;

    income_tax + vat_revenue + ssc_emp + ssc_house + other_revenue
}

/// Government expenditure: nominal public consumption and investment,
/// transfers, interest on debt and other outlays at 8% of nominal GDP.
fn expenditure(panel: &Panel, t: Year, p: &Ml2Params) -> f64 {
    let cg_nom = panel.get("CG_", t) * panel.get("PC_", t);
    let ig_nom = panel.get("IG_", t) * panel.get("PIG_", t);
    let tgh = panel.get("TGH_", t);

    let b = if panel.has("B_") {
        panel.get("B_", t)
    } else {
        panel.get("GDPN_", t) * p.debt_gdp
    };
    let interest = b * p.debt_rate;

    let other_exp = panel.get("GDPN_", t) * 0.08;

    cg_nom + ig_nom + tgh + interest + other_exp
}

/// `D = GRECEIPTS - GEXPENSE` (negative = deficit)
fn deficit(panel: &Panel, t: Year, _p: &Ml2Params) -> f64 {
    panel.get("GRECEIPTS_", t) - panel.get("GEXPENSE_", t)
}

/// Debt accumulation `B = B[-1] - D`.
fn debt(panel: &Panel, t: Year, _p: &Ml2Params) -> f64 {
    panel.lag("B_", t) - panel.get("D_", t)
}

/// `DR = D / GDPN`
fn deficit_ratio(panel: &Panel, t: Year, _p: &Ml2Params) -> f64 {
    let gdpn = panel.get("GDPN_", t);
    if gdpn == 0.0 {
        return 0.0;
    }
    panel.get("D_", t) / gdpn
}

/// `BR = B / GDPN`
fn debt_ratio(panel: &Panel, t: Year, _p: &Ml2Params) -> f64 {
    let gdpn = panel.get("GDPN_", t);
    if gdpn == 0.0 {
        return panel.lag("BR_", t);
    }
    panel.get("B_", t) / gdpn
}

pub(crate) fn equations() -> Vec<Equation> {
    use EquationKind::*;
    vec![
        Equation::new(
            "GRECEIPTS_",
            Identity,
            &["W_", "L_", "WG_", "NG_", "C_", "PC_", "ITPC0R_", "CSSFR_", "CSSHR_", "GDPN_"],
            receipts,
        ),
        Equation::new(
            "GEXPENSE_",
            Identity,
            &["CG_", "PC_", "IG_", "PIG_", "TGH_", "B_", "GDPN_"],
            expenditure,
        ),
        Equation::new("D_", Identity, &["GRECEIPTS_", "GEXPENSE_"], deficit),
        Equation::new("B_", Identity, &["D_"], debt),
        Equation::new("DR_", Identity, &["D_", "GDPN_"], deficit_ratio),
        Equation::new("BR_", Identity, &["B_", "GDPN_"], debt_ratio),
    ]
}
