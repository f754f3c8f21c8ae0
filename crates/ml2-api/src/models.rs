use serde::Deserialize;
use serde::Serialize;

use ml2_core::model::instruments::InstrumentSpec;
use ml2_core::KeyIndicators;

/// Body of `POST /simulate` and the export endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationRequest {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub instruments: std::collections::BTreeMap<String, f64>,
}

fn default_name() -> String {
    "Scenario".to_string()
}

/// Response of `GET /baseline`.
#[derive(Debug, Serialize)]
pub struct BaselineResponse {
    pub indicators: KeyIndicators,
    pub instruments: &'static [InstrumentSpec],
}
