//! Baseline panel loading.
//!
//! The baseline file is a JSON object `{var_name: {"year": value, …}, …}`
//! with decimal-string year keys. Years must form one contiguous run and
//! every variable must carry a value for every year. Loading failures are
//! fatal at startup; there is no recovery path.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::model::panel::Panel;
use crate::model::Year;

#[derive(Debug, thiserror::Error)]
pub enum BaselineError {
    #[error("failed to read baseline file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed baseline file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("baseline file contains no variables")]
    Empty,
    #[error("baseline year key '{0}' is not an integer")]
    BadYear(String),
    #[error("baseline years are not contiguous: missing {0}")]
    MissingYear(Year),
    #[error("baseline needs a lag base year plus at least one simulation year")]
    TooShort,
    #[error("variable '{var}' has no value for year {year}")]
    MissingCell { var: String, year: Year },
}

/// Reads the pre-computed baseline panel from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct BaselineLoader {
    path: PathBuf,
}

impl BaselineLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load and validate the baseline panel.
    pub fn load(&self) -> Result<Panel, BaselineError> {
        let raw = std::fs::read_to_string(&self.path).map_err(|source| BaselineError::Read {
            path: self.path.clone(),
            source,
        })?;
        let data: BTreeMap<String, BTreeMap<String, f64>> = serde_json::from_str(&raw)?;
        if data.is_empty() {
            return Err(BaselineError::Empty);
        }

        let mut min = Year::MAX;
        let mut max = Year::MIN;
        let mut seen = std::collections::BTreeSet::new();
        for series in data.values() {
            for key in series.keys() {
                let year: Year = key.parse().map_err(|_| BaselineError::BadYear(key.clone()))?;
                min = min.min(year);
                max = max.max(year);
                seen.insert(year);
            }
        }
        if seen.len() < 2 {
            return Err(BaselineError::TooShort);
        }
        for year in min..=max {
            if !seen.contains(&year) {
                return Err(BaselineError::MissingYear(year));
            }
        }

        let years: Vec<Year> = (min..=max).collect();
        let mut panel = Panel::new(years.clone());
        for (var, series) in &data {
            panel.add(var, 0.0);
            for &year in &years {
                let value = series.get(&year.to_string()).ok_or_else(|| {
                    BaselineError::MissingCell { var: var.clone(), year }
                })?;
                panel.set(var, year, *value);
            }
        }
        tracing::info!(
            path = %self.path.display(),
            variables = panel.names().len(),
            years = panel.years().len(),
            "loaded baseline panel"
        );
        Ok(panel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(content: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn loads_a_minimal_panel() {
        let f = write_file(r#"{"GDP_": {"2012": 100.0, "2013": 102.0}}"#);
        let panel = BaselineLoader::new(f.path()).load().unwrap();
        assert_eq!(panel.years(), &[2012, 2013]);
        assert_eq!(panel.get("GDP_", 2013), 102.0);
    }

    #[test]
    fn rejects_missing_files() {
        let err = BaselineLoader::new("/nonexistent/baseline.json").load().unwrap_err();
        assert!(matches!(err, BaselineError::Read { .. }));
    }

    #[test]
    fn rejects_malformed_json() {
        let f = write_file("{not json");
        let err = BaselineLoader::new(f.path()).load().unwrap_err();
        assert!(matches!(err, BaselineError::Parse(_)));
    }

    #[test]
    fn rejects_year_gaps() {
        let f = write_file(r#"{"GDP_": {"2012": 1.0, "2014": 2.0}}"#);
        let err = BaselineLoader::new(f.path()).load().unwrap_err();
        assert!(matches!(err, BaselineError::MissingYear(2013)));
    }

    #[test]
    fn rejects_non_integer_years() {
        let f = write_file(r#"{"GDP_": {"early": 1.0}}"#);
        let err = BaselineLoader::new(f.path()).load().unwrap_err();
        assert!(matches!(err, BaselineError::BadYear(_)));
    }

    #[test]
    fn rejects_holes_in_a_column() {
        let f = write_file(r#"{"GDP_": {"2012": 1.0, "2013": 2.0}, "PC_": {"2012": 1.0}}"#);
        let err = BaselineLoader::new(f.path()).load().unwrap_err();
        match err {
            BaselineError::MissingCell { var, year } => {
                assert_eq!(var, "PC_");
                assert_eq!(year, 2013);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
