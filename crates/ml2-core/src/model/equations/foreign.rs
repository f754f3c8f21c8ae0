//! Foreign trade block: nominal trade flows and the trade balance.

use super::{Equation, EquationKind};
use crate::model::panel::Panel;
use crate::model::params::Ml2Params;
use crate::model::Year;

/// `XN = X * PX`
fn nominal_exports(panel: &Panel, t: Year, _p: &Ml2Params) -> f64 {
    panel.get("X_", t) * panel.get("PX_", t)
}

/// `MN = M * PM`
fn nominal_imports(panel: &Panel, t: Year, _p: &Ml2Params) -> f64 {
    panel.get("M_", t) * panel.get("PM_", t)
}

/// `TB = XN - MN`
fn trade_balance(panel: &Panel, t: Year, _p: &Ml2Params) -> f64 {
    panel.get("XN_", t) - panel.get("MN_", t)
}

/// `TBR = TB / GDPN`
fn trade_balance_ratio(panel: &Panel, t: Year, _p: &Ml2Params) -> f64 {
    let gdpn = panel.get("GDPN_", t);
    if gdpn == 0.0 {
        return 0.0;
    }
    panel.get("TB_", t) / gdpn
}

pub(crate) fn equations() -> Vec<Equation> {
    use EquationKind::*;
    vec![
        Equation::new("XN_", Identity, &["X_", "PX_"], nominal_exports),
        Equation::new("MN_", Identity, &["M_", "PM_"], nominal_imports),
        Equation::new("TB_", Identity, &["XN_", "MN_"], trade_balance),
        Equation::new("TBR_", Identity, &["TB_", "GDPN_"], trade_balance_ratio),
    ]
}
