//! Accounting identities, exogenous trends and instrument mappings:
//! demand aggregation, deflator-weighted nominal GDP, income flows and
//! the technical columns the pre-recursive phase writes.

use super::{opt, safe_exp, Equation, EquationKind};
use crate::model::panel::Panel;
use crate::model::params::Ml2Params;
use crate::model::Year;

/// Public investment trend plus the VIG_X instrument (millions to model
/// units): `IG = IG[-1]*(1 + g_tfp) + VIG_X/1000`.
fn public_investment(panel: &Panel, t: Year, p: &Ml2Params) -> f64 {
    let trend = panel.lag("IG_", t) * (1.0 + p.tfp_growth);
    trend + opt(panel, "VIG_X", t, 0.0) / 1000.0
}

/// Public consumption: the public wage bill plus a trending non-wage
/// component carried over from the previous year.
fn public_consumption(panel: &Panel, t: Year, p: &Ml2Params) -> f64 {
    let wage_bill = panel.get("WG_", t) * panel.get("NG_", t) / 1000.0;
    let wage_bill_1 = panel.lag("WG_", t) * panel.lag("NG_", t) / 1000.0;
    let non_wage = panel.lag("CG_", t) - wage_bill_1;
    wage_bill + non_wage * (1.0 + p.tfp_growth)
}

/// Inventory changes are carried flat.
fn stock_changes(panel: &Panel, t: Year, _p: &Ml2Params) -> f64 {
    panel.lag("DS_", t)
}

/// `DD = C + IF + IH + IG + CG + DS`
fn domestic_demand(panel: &Panel, t: Year, _p: &Ml2Params) -> f64 {
    panel.get("C_", t)
        + panel.get("IF_", t)
        + panel.get("IH_", t)
        + panel.get("IG_", t)
        + panel.get("CG_", t)
        + panel.get("DS_", t)
}

/// Expenditure-side GDP at constant prices: `GDP = DD + X - M`.
fn gdp(panel: &Panel, t: Year, _p: &Ml2Params) -> f64 {
    panel.get("DD_", t) + panel.get("X_", t) - panel.get("M_", t)
}

/// GDP deflator: component-weighted nominal expenditure over real GDP.
/// Public consumption and stock changes are valued at the CPI.
fn gdp_deflator(panel: &Panel, t: Year, _p: &Ml2Params) -> f64 {
    let gdp = panel.get("GDP_", t);
    if gdp == 0.0 {
        return panel.lag("PGDP_", t);
    }
    let nom = panel.get("C_", t) * panel.get("PC_", t)
        + panel.get("IF_", t) * panel.get("PIF_", t)
        + panel.get("IH_", t) * panel.get("PIH_", t)
        + panel.get("IG_", t) * panel.get("PIG_", t)
        + panel.get("CG_", t) * panel.get("PC_", t)
        + panel.get("X_", t) * panel.get("PX_", t)
        - panel.get("M_", t) * panel.get("PM_", t)
        + panel.get("DS_", t) * panel.get("PC_", t);
    nom / gdp
}

/// `GDPN = GDP * PGDP`
fn nominal_gdp(panel: &Panel, t: Year, _p: &Ml2Params) -> f64 {
    panel.get("GDP_", t) * panel.get("PGDP_", t)
}

/// `I = IF + IH + IG`
fn total_investment(panel: &Panel, t: Year, _p: &Ml2Params) -> f64 {
    panel.get("IF_", t) + panel.get("IH_", t) + panel.get("IG_", t)
}

/// Profit rate `PROFIT = (Y - W*L/1000) / (PC*K)`.
fn profit_rate(panel: &Panel, t: Year, _p: &Ml2Params) -> f64 {
    let y = panel.get("Y_", t);
    let w = panel.get("W_", t);
    let l = panel.get("L_", t);
    let pc = panel.get("PC_", t);
    let k = panel.get("K_", t);
    if pc * k == 0.0 {
        return panel.lag("PROFIT_", t);
    }
    (y - w * l / 1000.0) / (pc * k)
}

/// Ex-post real rate `RREAL = RNOM - CPI inflation`.
fn real_interest_rate(panel: &Panel, t: Year, p: &Ml2Params) -> f64 {
    let rnom = opt(panel, "RNOM_", t, p.r_nominal);
    let pc = panel.get("PC_", t);
    let pc_1 = panel.lag("PC_", t);
    let infl = if pc_1 > 0.0 { (pc - pc_1) / pc_1 } else { 0.0 };
    rnom - infl
}

/// Mortgage rate: nominal rate plus a fixed 1.5pp spread.
fn mortgage_rate(panel: &Panel, t: Year, p: &Ml2Params) -> f64 {
    opt(panel, "RNOM_", t, p.r_nominal) + 0.015
}

/// Labour force trend.
fn labour_force(panel: &Panel, t: Year, p: &Ml2Params) -> f64 {
    panel.lag("NAT_", t) * (1.0 + p.nat_growth)
}

/// Public employment: previous level plus the NG_X instrument.
fn public_employment(panel: &Panel, t: Year, _p: &Ml2Params) -> f64 {
    panel.lag("NG_", t) + opt(panel, "NG_X", t, 0.0)
}

/// Household disposable income: net-of-SSC wages minus income tax plus
/// transfers. The DTH_X instrument shifts income tax receipts directly
/// (millions to model units).
fn disposable_income(panel: &Panel, t: Year, p: &Ml2Params) -> f64 {
    let private_wages = panel.get("W_", t) * panel.get("L_", t) / 1000.0;
    let public_wages = panel.get("WG_", t) * panel.get("NG_", t) / 1000.0;
    let total_wages = private_wages + public_wages;

    let css_house = opt(panel, "CSSHR_", t, p.css_house_rate);
    let net_wages = total_wages * (1.0 - css_house);

    // effective income tax rate on net wages
    let base_tax_rate = 0.25;
    let tax = net_wages * base_tax_rate + opt(panel, "DTH_X", t, 0.0) / 1000.0;

    let tgh = opt(panel, "TGH_", t, 0.0);
    net_wages - tax + tgh
}

/// Transfers to households grow with the CPI plus the TGH_X growth
/// instrument.
fn transfers(panel: &Panel, t: Year, _p: &Ml2Params) -> f64 {
    let tgh_prev = panel.lag("TGH_", t);
    let dln_pc = panel.dln("PC_", t);
    let tgh_x = opt(panel, "TGH_X", t, 0.0);
    tgh_prev * safe_exp(dln_pc) * (1.0 + tgh_x / 100.0)
}

/// Effective VAT rate in percent, from the instrument when present.
fn vat_rate(panel: &Panel, t: Year, p: &Ml2Params) -> f64 {
    if panel.has("ITPC0R_X") {
        return panel.get("ITPC0R_X", t);
    }
    p.vat_rate * 100.0
}

/// Employer SSC rate as a fraction, from the instrument when present.
fn employer_ssc_rate(panel: &Panel, t: Year, p: &Ml2Params) -> f64 {
    if panel.has("CSSFR_X") {
        return panel.get("CSSFR_X", t) / 100.0;
    }
    p.css_emp_rate
}

/// Employee SSC rate as a fraction, from the instrument when present.
fn employee_ssc_rate(panel: &Panel, t: Year, p: &Ml2Params) -> f64 {
    if panel.has("CSSHR_X") {
        return panel.get("CSSHR_X", t) / 100.0;
    }
    p.css_house_rate
}

/// Nominal interest rate held flat.
fn nominal_interest_rate(panel: &Panel, t: Year, _p: &Ml2Params) -> f64 {
    panel.lag("RNOM_", t)
}

/// World demand trend.
fn world_demand(panel: &Panel, t: Year, p: &Ml2Params) -> f64 {
    panel.lag("XWORLD_", t) * (1.0 + p.world_growth)
}

/// Foreign competitor price trend.
fn competitor_price(panel: &Panel, t: Year, p: &Ml2Params) -> f64 {
    panel.lag("PCOMP_", t) * (1.0 + p.pcomp_growth)
}

/// Economy-wide wage bill `WB = W*L/1000 + WG*NG/1000`.
fn wage_bill(panel: &Panel, t: Year, _p: &Ml2Params) -> f64 {
    panel.get("W_", t) * panel.get("L_", t) / 1000.0
        + panel.get("WG_", t) * panel.get("NG_", t) / 1000.0
}

/// Labour productivity `PROD = Y / LH`.
fn productivity(panel: &Panel, t: Year, _p: &Ml2Params) -> f64 {
    let lh = panel.get("LH_", t);
    if lh == 0.0 {
        return panel.lag("PROD_", t);
    }
    panel.get("Y_", t) / lh
}

pub(crate) fn equations() -> Vec<Equation> {
    use EquationKind::*;
    vec![
        Equation::new("IG_", Technical, &[], public_investment),
        Equation::new("CG_", Identity, &["WG_", "NG_"], public_consumption),
        Equation::new("DS_", Technical, &["Y_"], stock_changes),
        Equation::new(
            "DD_",
            Identity,
            &["C_", "IF_", "IH_", "IG_", "CG_", "DS_"],
            domestic_demand,
        ),
        Equation::new("GDP_", Identity, &["DD_", "X_", "M_"], gdp),
        Equation::new(
            "PGDP_",
            Identity,
            &[
                "PC_", "PIF_", "PIG_", "PIH_", "PX_", "PM_", "C_", "IF_", "IG_", "IH_", "X_",
                "M_", "CG_",
            ],
            gdp_deflator,
        ),
        Equation::new("GDPN_", Identity, &["GDP_", "PGDP_"], nominal_gdp),
        Equation::new("I_", Identity, &["IF_", "IH_", "IG_"], total_investment),
        Equation::new("PROFIT_", Identity, &["Y_", "W_", "L_", "PC_", "K_"], profit_rate),
        Equation::new("RREAL_", Identity, &["RNOM_", "PC_"], real_interest_rate),
        Equation::new("RMORT_", Technical, &["RNOM_"], mortgage_rate),
        Equation::new("NAT_", Technical, &[], labour_force),
        Equation::new("NG_", Technical, &[], public_employment),
        Equation::new(
            "YDH_",
            Identity,
            &["W_", "L_", "WG_", "NG_", "PC_", "TGH_"],
            disposable_income,
        ),
        Equation::new("TGH_", Technical, &["PC_"], transfers),
        Equation::new("ITPC0R_", Technical, &[], vat_rate),
        Equation::new("CSSFR_", Technical, &[], employer_ssc_rate),
        Equation::new("CSSHR_", Technical, &[], employee_ssc_rate),
        Equation::new("RNOM_", Technical, &[], nominal_interest_rate),
        Equation::new("XWORLD_", Technical, &[], world_demand),
        Equation::new("PCOMP_", Technical, &[], competitor_price),
        Equation::new("WB_", Identity, &["W_", "L_", "WG_", "NG_"], wage_bill),
        Equation::new("PROD_", Identity, &["Y_", "LH_"], productivity),
    ]
}
