use std::sync::Arc;

use axum::{extract::State, Json};
use ml2_core::model::instruments::{InstrumentSpec, INSTRUMENTS};
use ml2_core::SimulationOutput;

use crate::{
    error::ApiError,
    models::{BaselineResponse, SimulationRequest},
    state::AppState,
};

// ---------------------------------------------------------------------------
// POST /simulate
// ---------------------------------------------------------------------------

pub async fn run_simulation(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SimulationRequest>,
) -> Result<Json<SimulationOutput>, ApiError> {
    let engine = Arc::clone(&state.engine);
    // Solving is CPU-bound; keep it off the async workers
    let output = tokio::task::spawn_blocking(move || {
        engine.simulate(&request.instruments, &request.name)
    })
    .await
    .map_err(|e| ApiError::Internal(anyhow::anyhow!("simulation task panicked: {e}")))??;

    Ok(Json(output))
}

// ---------------------------------------------------------------------------
// GET /baseline
// ---------------------------------------------------------------------------

pub async fn get_baseline(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BaselineResponse>, ApiError> {
    Ok(Json(BaselineResponse {
        indicators: state.engine.baseline_indicators(),
        instruments: INSTRUMENTS,
    }))
}

// ---------------------------------------------------------------------------
// GET /instruments
// ---------------------------------------------------------------------------

pub async fn get_instruments() -> Json<&'static [InstrumentSpec]> {
    Json(INSTRUMENTS)
}
