//! Structural equations of the model.
//!
//! Every equation is a pure function of the panel, the year and the
//! parameter bundle, packaged with the name of the variable it writes,
//! its classification and the contemporaneous variables it reads. The
//! registry owns one instance per target variable and the solver only
//! ever calls [`Equation::evaluate`].
//!
//! Shared numerical conventions for the behavioral equations:
//! growing positive quantities update in log-change form
//! `new = prev * safe_exp(dln)` with `prev` the lagged level; if `prev`
//! is non-positive the equation returns it unchanged. Optional inputs
//! (instrument columns a panel may not carry) fall back to the relevant
//! trend scalar, zero or one per equation.

pub mod expenditure;
pub mod foreign;
pub mod identities;
pub mod labor;
pub mod prices;
pub mod production;
pub mod public_finance;

use crate::model::panel::Panel;
use crate::model::params::Ml2Params;
use crate::model::Year;

/// Hard bound on a one-year log change inside the iterative solver.
const EXP_CLAMP: f64 = 0.5;

/// Clamped exponential. The clamp is load-bearing: during the first damped
/// sweeps of a year the iterate can be far from the fixed point and an
/// unclamped exponential overflows long before convergence.
pub fn safe_exp(x: f64) -> f64 {
    x.clamp(-EXP_CLAMP, EXP_CLAMP).exp()
}

/// `panel.get(var, t)` with a fallback for columns the panel may lack.
pub(crate) fn opt(panel: &Panel, var: &str, t: Year, fallback: f64) -> f64 {
    if panel.has(var) {
        panel.get(var, t)
    } else {
        fallback
    }
}

/// Lagged read with a fallback for columns the panel may lack.
pub(crate) fn opt_lag(panel: &Panel, var: &str, t: Year, fallback: f64) -> f64 {
    if panel.has(var) {
        panel.lag(var, t)
    } else {
        fallback
    }
}

/// Equation classification. Informational only: the solver treats all
/// kinds identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EquationKind {
    /// Accounting rearrangement
    Identity,
    /// Estimated elasticity relation
    Behavioral,
    /// Exogenous trend or instrument mapping
    Technical,
}

type EvalFn = fn(&Panel, Year, &Ml2Params) -> f64;

/// One structural equation: target variable, kind, contemporaneous reads
/// and the evaluation function. Lagged reads are implicit.
pub struct Equation {
    name: &'static str,
    kind: EquationKind,
    depends_on: &'static [&'static str],
    eval: EvalFn,
}

impl Equation {
    pub(crate) const fn new(
        name: &'static str,
        kind: EquationKind,
        depends_on: &'static [&'static str],
        eval: EvalFn,
    ) -> Self {
        Self { name, kind, depends_on, eval }
    }

    /// Target variable this equation writes.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> EquationKind {
        self.kind
    }

    /// Variables read at time `t`.
    pub fn depends_on(&self) -> &'static [&'static str] {
        self.depends_on
    }

    /// Compute the target's new value for year `t` on the given panel.
    pub fn evaluate(&self, panel: &Panel, t: Year, params: &Ml2Params) -> f64 {
        (self.eval)(panel, t, params)
    }
}

impl std::fmt::Debug for Equation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Equation")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("depends_on", &self.depends_on)
            .finish()
    }
}
