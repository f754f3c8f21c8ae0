//! Estimated scalar parameters of the model.
//!
//! One immutable bundle of calibrated elasticities, trend growth rates and
//! structural ratios shared by every equation. The values reproduce the
//! published estimation round and must not be edited casually: baseline
//! trajectories and all regression tests depend on them bit-for-bit.

use serde::{Deserialize, Serialize};

/// Calibrated scalar parameters, IODE naming conventions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ml2Params {
    // ---- Production function ----
    /// Labour share in the Cobb-Douglas production function
    pub alpha: f64,
    /// Depreciation rate of the capital stock [yr⁻¹]
    pub delta: f64,
    /// TFP trend growth rate [yr⁻¹]
    pub tfp_growth: f64,

    // ---- Labour demand ECM ----
    pub lh0: f64,
    /// Short-run output elasticity of hours
    pub lh1: f64,
    /// ECM adjustment speed
    pub lh2: f64,

    // ---- Consumption ECM ----
    pub c0: f64,
    /// Short-run MPC out of real disposable income
    pub c1: f64,
    /// Real interest rate effect
    pub c2: f64,
    /// Precautionary saving (unemployment change)
    pub c3: f64,
    /// ECM adjustment speed
    pub c4: f64,
    /// Long-run income elasticity
    pub c5: f64,
    /// Habit persistence (lagged consumption growth)
    pub c6: f64,

    // ---- Business investment ECM ----
    pub if0: f64,
    /// Accelerator (output growth)
    pub if1: f64,
    /// Profitability effect
    pub if2: f64,
    /// Real interest rate effect
    pub if3: f64,
    /// Capacity utilisation effect
    pub if4: f64,
    /// ECM adjustment speed
    pub if5: f64,
    /// Long-run output elasticity
    pub if6: f64,

    // ---- Housing investment ECM ----
    pub ih0: f64,
    /// Real disposable income effect
    pub ih1: f64,
    /// Mortgage rate effect
    pub ih2: f64,
    /// ECM adjustment speed
    pub ih3: f64,
    /// Long-run income elasticity
    pub ih4: f64,

    // ---- Wage equation (Phillips curve + ECM) ----
    pub w0: f64,
    /// CPI indexation coefficient (near-full)
    pub w1: f64,
    /// Productivity pass-through
    pub w2: f64,
    /// Phillips curve slope (unemployment gap)
    pub w3: f64,
    /// Wage share convergence speed
    pub w4: f64,
    /// Long-run wage share target
    pub w5: f64,

    // ---- Consumer prices ECM ----
    pub pc0: f64,
    /// Cost push (ULC pass-through)
    pub pc1: f64,
    /// Import price pass-through
    pub pc2: f64,
    /// Output gap effect
    pub pc3: f64,
    /// ECM adjustment speed
    pub pc4: f64,
    /// Long-run cost elasticity
    pub pc5: f64,
    /// VAT pass-through to consumer prices
    pub pc_vat: f64,

    // ---- Investment deflators ----
    pub pif1: f64,
    pub pif2: f64,
    pub pif3: f64,
    pub pih1: f64,
    pub pih2: f64,
    pub pih3: f64,
    pub pig1: f64,
    pub pig2: f64,

    // ---- Export prices ----
    pub px1: f64,
    pub px2: f64,
    pub px3: f64,

    // ---- Unit cost weights ----
    /// Wage share in the macro cost index
    pub cost_w: f64,
    /// Import price share in the macro cost index
    pub cost_pm: f64,

    // ---- Export volume ECM ----
    pub x0: f64,
    pub x1: f64,
    pub x2: f64,
    pub x3: f64,
    pub x4: f64,
    pub x5: f64,

    // ---- Import volume ECM ----
    pub m0: f64,
    pub m1: f64,
    pub m2: f64,
    pub m3: f64,
    pub m4: f64,
    pub m5: f64,

    // ---- Public finance ----
    /// Baseline employer SSC rate [fraction of gross wages]
    pub css_emp_rate: f64,
    /// Baseline employee SSC rate [fraction of gross wages]
    pub css_house_rate: f64,
    /// Baseline standard VAT rate [fraction]
    pub vat_rate: f64,
    /// Average interest rate on public debt [yr⁻¹]
    pub debt_rate: f64,
    /// Steady-state debt/GDP ratio (fallback when no debt level is known)
    pub debt_gdp: f64,

    // ---- Structural ----
    /// Non-accelerating-inflation rate of unemployment
    pub nairu: f64,
    /// Labour force trend growth [yr⁻¹]
    pub nat_growth: f64,

    // ---- Base year levels (lag base, model units) ----
    pub gdp_base: f64,
    pub k_base: f64,
    pub l_base: f64,
    pub nat_base: f64,
    pub w_base: f64,
    pub pc_base: f64,
    /// Deficit/GDP in the base year (negative = deficit)
    pub deficit_base: f64,
    /// Nominal interest rate in the base year [yr⁻¹]
    pub r_nominal: f64,

    // ---- Foreign environment ----
    /// World trade volume growth [yr⁻¹]
    pub world_growth: f64,
    /// Import price growth [yr⁻¹]
    pub pm_growth: f64,
    /// Foreign competitor price growth [yr⁻¹]
    pub pcomp_growth: f64,
}

impl Default for Ml2Params {
    fn default() -> Self {
        Self {
            alpha: 0.675,
            delta: 0.05,
            tfp_growth: 0.007,

            lh0: -0.002,
            lh1: 0.45,
            lh2: -0.12,

            c0: 0.003,
            c1: 0.55,
            c2: -0.15,
            c3: -0.08,
            c4: -0.10,
            c5: 0.85,
            c6: 0.30,

            if0: 0.002,
            if1: 0.35,
            if2: 0.15,
            if3: -0.10,
            if4: 0.20,
            if5: -0.08,
            if6: 0.90,

            ih0: 0.001,
            ih1: 0.40,
            ih2: -0.25,
            ih3: -0.06,
            ih4: 0.80,

            w0: 0.002,
            w1: 0.95,
            w2: 0.60,
            w3: -0.50,
            w4: -0.08,
            w5: 0.55,

            pc0: 0.001,
            pc1: 0.70,
            pc2: 0.20,
            pc3: 0.05,
            pc4: -0.10,
            pc5: 0.90,
            pc_vat: 0.38,

            pif1: 0.60,
            pif2: 0.30,
            pif3: -0.08,
            pih1: 0.50,
            pih2: 0.25,
            pih3: -0.06,
            pig1: 0.55,
            pig2: 0.25,

            px1: 0.40,
            px2: 0.55,
            px3: -0.12,

            cost_w: 0.65,
            cost_pm: 0.35,

            x0: 0.002,
            x1: 0.80,
            x2: -0.30,
            x3: -0.10,
            x4: 1.00,
            x5: -0.50,

            m0: 0.001,
            m1: 0.70,
            m2: 0.20,
            m3: -0.08,
            m4: 1.10,
            m5: 0.40,

            css_emp_rate: 0.30,
            css_house_rate: 0.13,
            vat_rate: 0.21,
            debt_rate: 0.03,
            debt_gdp: 1.00,

            nairu: 0.08,
            nat_growth: 0.005,

            gdp_base: 401.5,
            k_base: 1744.0,
            l_base: 3533.7,
            nat_base: 4648.0,
            w_base: 0.011,
            pc_base: 0.9604,
            deficit_base: -0.027,
            r_nominal: 0.03,

            world_growth: 0.03,
            pm_growth: 0.015,
            pcomp_growth: 0.015,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calibration_spot_values() {
        let p = Ml2Params::default();
        assert_eq!(p.alpha, 0.675);
        assert_eq!(p.delta, 0.05);
        assert_eq!(p.tfp_growth, 0.007);
        assert_eq!(p.nairu, 0.08);
        assert_eq!(p.vat_rate, 0.21);
        assert_eq!(p.css_emp_rate, 0.30);
        assert_eq!(p.css_house_rate, 0.13);
        assert_eq!(p.debt_rate, 0.03);
        assert_eq!(p.debt_gdp, 1.00);
        assert_eq!(p.world_growth, 0.03);
        assert_eq!(p.pm_growth, 0.015);
        assert_eq!(p.pcomp_growth, 0.015);
    }

    #[test]
    fn cost_weights_sum_to_one() {
        let p = Ml2Params::default();
        assert!((p.cost_w + p.cost_pm - 1.0).abs() < 1e-12);
    }
}
