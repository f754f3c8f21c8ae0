//! Equation registry: owns every structural equation and fixes the three
//! solve orders.
//!
//! The model's core block is cyclic (output needs labour, labour needs
//! wages, wages need prices, prices need costs, costs need output), so no
//! topological order exists for it. The registry instead splits the
//! variables into three phases: `pre` and `post` are topologically sorted
//! recursive sweeps, `inter` is the closed cyclic block handed to the
//! damped Gauss-Seidel iteration. The `inter` order is chosen to cut
//! iteration counts (output → labour → wages → prices → income → demand →
//! trade → GDP); correctness does not depend on it.

use std::collections::HashMap;

use crate::model::equations::{self, Equation};

/// Phase 1: exogenous trends and instrument mappings, one pass per year.
pub const PRE_ORDER: &[&str] = &[
    "TFP_", "NAT_", "NG_", "XWORLD_", "PCOMP_", "PM_", "RNOM_", "RMORT_", "ITPC0R_", "CSSFR_",
    "CSSHR_", "IG_", "TGH_", "DS_",
];

/// Phase 2: the interdependent block, iterated to a fixed point.
pub const INTER_ORDER: &[&str] = &[
    "K_", "Y_", "YSTAR_", "YGAP_", "ZKF_", "LH_", "L_", "U_", "UR_", "W_", "WG_", "ULC_",
    "COST_", "PC_", "PIF_", "PIH_", "PIG_", "PX_", "RREAL_", "PROFIT_", "CG_", "YDH_", "C_",
    "IF_", "IH_", "DD_", "X_", "M_", "GDP_", "PGDP_", "GDPN_", "GRECEIPTS_", "GEXPENSE_", "D_",
    "B_",
];

/// Phase 3: derived ratios and diagnostics, one pass after convergence.
pub const POST_ORDER: &[&str] = &[
    "I_", "PROD_", "WB_", "DR_", "BR_", "XN_", "MN_", "TB_", "TBR_",
];

/// Central registry mapping target variable to its equation.
#[derive(Debug)]
pub struct EquationRegistry {
    equations: HashMap<&'static str, Equation>,
}

impl EquationRegistry {
    pub fn new() -> Self {
        let mut map = HashMap::new();
        let blocks = [
            equations::production::equations(),
            equations::labor::equations(),
            equations::expenditure::equations(),
            equations::prices::equations(),
            equations::identities::equations(),
            equations::public_finance::equations(),
            equations::foreign::equations(),
        ];
        for eq in blocks.into_iter().flatten() {
            map.insert(eq.name(), eq);
        }
        Self { equations: map }
    }

    /// The equation writing `var`, if the model has one.
    pub fn get(&self, var: &str) -> Option<&Equation> {
        self.equations.get(var)
    }

    pub fn pre_order(&self) -> &'static [&'static str] {
        PRE_ORDER
    }

    pub fn inter_order(&self) -> &'static [&'static str] {
        INTER_ORDER
    }

    pub fn post_order(&self) -> &'static [&'static str] {
        POST_ORDER
    }

    /// Every variable the solver writes, in phase order.
    pub fn all_variables(&self) -> Vec<&'static str> {
        PRE_ORDER
            .iter()
            .chain(INTER_ORDER)
            .chain(POST_ORDER)
            .copied()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.equations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.equations.is_empty()
    }
}

impl Default for EquationRegistry {
    fn default() -> Self {
        Self::new()
    }
}
