use std::sync::Arc;

use ml2_core::SimulationEngine;

/// Default baseline location relative to the server's working directory.
const DEFAULT_BASELINE: &str = "data/baseline/baseline_variables.json";

pub struct AppState {
    pub engine: Arc<SimulationEngine>,
}

/// Load the baseline panel once at startup; a broken baseline is fatal.
pub fn init_app_state() -> anyhow::Result<AppState> {
    let path = std::env::var("ML2_BASELINE").unwrap_or_else(|_| DEFAULT_BASELINE.into());
    let engine = SimulationEngine::from_file(&path)?;
    Ok(AppState { engine: Arc::new(engine) })
}
