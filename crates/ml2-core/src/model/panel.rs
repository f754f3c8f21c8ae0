//! Dense (variable × year) panel with the IODE-style time operators the
//! equations are written against: `lag`, `d`, `dln`, `grt`, `mavg`.
//!
//! Values are stored in one flat `Vec<f64>` (one row per variable) with a
//! side map from variable name to row, so a scenario copy is a plain
//! `Clone` and cell access is O(1). Years form one contiguous ascending
//! run; the first year is the lag base and is never solved.
//!
//! Accessing an unregistered variable or a year outside the horizon is a
//! programming error and panics with the offending name. The loader and
//! the engine's ensure pass guarantee neither can happen for model
//! variables.

use std::collections::HashMap;

use crate::model::Year;

/// Dense panel of variable time series.
#[derive(Debug, Clone)]
pub struct Panel {
    years: Vec<Year>,
    names: Vec<String>,
    index: HashMap<String, usize>,
    values: Vec<f64>,
}

impl Panel {
    /// Create an empty panel over a contiguous ascending year range.
    pub fn new(years: Vec<Year>) -> Self {
        assert!(years.len() >= 2, "panel needs a lag base plus at least one simulation year");
        assert!(
            years.windows(2).all(|w| w[1] == w[0] + 1),
            "panel years must be contiguous and ascending"
        );
        Self {
            years,
            names: Vec::new(),
            index: HashMap::new(),
            values: Vec::new(),
        }
    }

    /// All known years, lag base first.
    pub fn years(&self) -> &[Year] {
        &self.years
    }

    /// Simulation years (everything after the lag base).
    pub fn sim_years(&self) -> &[Year] {
        &self.years[1..]
    }

    /// Column names in insertion order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn contains_year(&self, t: Year) -> bool {
        t >= self.years[0] && t <= *self.years.last().unwrap()
    }

    pub fn has(&self, var: &str) -> bool {
        self.index.contains_key(var)
    }

    /// Introduce a column filled with `default`. Idempotent.
    pub fn add(&mut self, var: &str, default: f64) {
        if self.index.contains_key(var) {
            return;
        }
        self.index.insert(var.to_string(), self.names.len());
        self.names.push(var.to_string());
        self.values.extend(std::iter::repeat(default).take(self.years.len()));
    }

    fn row(&self, var: &str) -> usize {
        match self.index.get(var) {
            Some(&r) => r,
            None => panic!("unknown panel variable '{var}'"),
        }
    }

    fn pos(&self, var: &str, t: Year) -> usize {
        if !self.contains_year(t) {
            panic!("year {t} outside the panel horizon (reading '{var}')");
        }
        (t - self.years[0]) as usize
    }

    pub fn get(&self, var: &str, t: Year) -> f64 {
        self.values[self.row(var) * self.years.len() + self.pos(var, t)]
    }

    pub fn set(&mut self, var: &str, t: Year, value: f64) {
        let idx = self.row(var) * self.years.len() + self.pos(var, t);
        self.values[idx] = value;
    }

    /// Lagged value `var[t-n]`.
    pub fn lag(&self, var: &str, t: Year) -> f64 {
        self.lag_n(var, t, 1)
    }

    pub fn lag_n(&self, var: &str, t: Year, n: i32) -> f64 {
        self.get(var, t - n)
    }

    /// First difference `var[t] - var[t-1]`.
    pub fn d(&self, var: &str, t: Year) -> f64 {
        self.get(var, t) - self.lag(var, t)
    }

    /// Log change `ln var[t] - ln var[t-1]`; 0.0 when either value is
    /// non-positive. The guard keeps early damped sweeps inside the
    /// feasible region instead of poisoning the iterate with NaN.
    pub fn dln(&self, var: &str, t: Year) -> f64 {
        let cur = self.get(var, t);
        let prev = self.lag(var, t);
        if cur <= 0.0 || prev <= 0.0 {
            return 0.0;
        }
        cur.ln() - prev.ln()
    }

    /// Growth rate in percent; 0.0 when the lag is zero.
    pub fn grt(&self, var: &str, t: Year) -> f64 {
        let prev = self.lag(var, t);
        if prev == 0.0 {
            return 0.0;
        }
        (self.get(var, t) - prev) / prev * 100.0
    }

    /// Arithmetic mean of the last `n` available values ending at `t`.
    pub fn mavg(&self, var: &str, t: Year, n: usize) -> f64 {
        let mut sum = 0.0;
        let mut count = 0usize;
        for i in 0..n {
            let yr = t - i as Year;
            if self.contains_year(yr) {
                sum += self.get(var, yr);
                count += 1;
            }
        }
        if count == 0 {
            0.0
        } else {
            sum / count as f64
        }
    }

    /// Nested map view `{var: {year: value}}` of the selected columns,
    /// skipping names the panel does not carry.
    pub fn to_map(
        &self,
        variables: &[&str],
    ) -> std::collections::BTreeMap<String, std::collections::BTreeMap<Year, f64>> {
        variables
            .iter()
            .filter(|v| self.has(v))
            .map(|v| {
                let col = self
                    .years
                    .iter()
                    .map(|&t| (t, self.get(v, t)))
                    .collect();
                (v.to_string(), col)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn panel() -> Panel {
        let mut p = Panel::new(vec![2012, 2013, 2014]);
        p.add("GDP_", 0.0);
        p.set("GDP_", 2012, 100.0);
        p.set("GDP_", 2013, 102.0);
        p.set("GDP_", 2014, 104.04);
        p
    }

    #[test]
    fn cell_access_and_lag() {
        let p = panel();
        assert_eq!(p.get("GDP_", 2013), 102.0);
        assert_eq!(p.lag("GDP_", 2013), 100.0);
        assert_eq!(p.lag_n("GDP_", 2014, 2), 100.0);
        assert_relative_eq!(p.d("GDP_", 2013), 2.0);
    }

    #[test]
    fn growth_operators() {
        let p = panel();
        assert_relative_eq!(p.grt("GDP_", 2013), 2.0, epsilon = 1e-12);
        assert_relative_eq!(p.dln("GDP_", 2013), (102.0f64 / 100.0).ln(), epsilon = 1e-12);
    }

    #[test]
    fn dln_guards_non_positive_values() {
        let mut p = panel();
        p.add("X_", 0.0);
        assert_eq!(p.dln("X_", 2013), 0.0);
        p.set("X_", 2012, -1.0);
        p.set("X_", 2013, 5.0);
        assert_eq!(p.dln("X_", 2013), 0.0);
    }

    #[test]
    fn grt_guards_zero_lag() {
        let mut p = panel();
        p.add("Z_", 0.0);
        assert_eq!(p.grt("Z_", 2013), 0.0);
    }

    #[test]
    fn mavg_truncates_at_the_horizon_start() {
        let p = panel();
        assert_relative_eq!(p.mavg("GDP_", 2013, 3), 101.0);
        assert_relative_eq!(p.mavg("GDP_", 2014, 2), 103.02);
    }

    #[test]
    fn add_is_idempotent() {
        let mut p = panel();
        p.add("GDP_", 55.0);
        assert_eq!(p.get("GDP_", 2013), 102.0);
    }

    #[test]
    fn copy_is_independent() {
        let p = panel();
        let mut q = p.clone();
        q.set("GDP_", 2013, 1.0);
        assert_eq!(p.get("GDP_", 2013), 102.0);
        assert_eq!(q.get("GDP_", 2013), 1.0);
    }

    #[test]
    #[should_panic(expected = "unknown panel variable")]
    fn unknown_variable_panics() {
        panel().get("NOPE_", 2013);
    }

    #[test]
    #[should_panic(expected = "outside the panel horizon")]
    fn unknown_year_panics() {
        panel().get("GDP_", 2011);
    }
}
