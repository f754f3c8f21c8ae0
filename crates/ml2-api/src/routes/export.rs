//! Tabular export endpoints: run a simulation and stream the results as a
//! CSV or XLSX download.

use std::sync::Arc;

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use ml2_core::SimulationOutput;

use crate::{error::ApiError, models::SimulationRequest, state::AppState};

/// Impact rows below this magnitude (percent) are dropped from exports.
const IMPACT_EXPORT_THRESHOLD: f64 = 0.001;

async fn run(state: &AppState, request: SimulationRequest) -> Result<SimulationOutput, ApiError> {
    let engine = Arc::clone(&state.engine);
    let output = tokio::task::spawn_blocking(move || {
        engine.simulate(&request.instruments, &request.name)
    })
    .await
    .map_err(|e| ApiError::Internal(anyhow::anyhow!("simulation task panicked: {e}")))??;
    Ok(output)
}

fn indicator_rows(result: &SimulationOutput) -> Vec<(String, Vec<f64>)> {
    vec![
        ("GDP Growth (%) - Baseline".into(), result.baseline.gdp_growth.clone()),
        ("GDP Growth (%) - Scenario".into(), result.scenario.gdp_growth.clone()),
        ("Inflation (%) - Baseline".into(), result.baseline.inflation.clone()),
        ("Inflation (%) - Scenario".into(), result.scenario.inflation.clone()),
        ("Deficit/GDP (%) - Baseline".into(), result.baseline.deficit_ratio.clone()),
        ("Deficit/GDP (%) - Scenario".into(), result.scenario.deficit_ratio.clone()),
        ("Unemployment (%) - Baseline".into(), result.baseline.unemployment.clone()),
        ("Unemployment (%) - Scenario".into(), result.scenario.unemployment.clone()),
    ]
}

fn build_csv(result: &SimulationOutput) -> Result<Vec<u8>, ApiError> {
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());

    wtr.write_record([format!("# ML2 Simulation: {}", result.name)])?;
    wtr.write_record([format!(
        "# Years: {}-{}",
        result.years.first().copied().unwrap_or_default(),
        result.years.last().copied().unwrap_or_default()
    )])?;
    wtr.write_record([""])?;

    let mut header = vec!["Indicator".to_string()];
    header.extend(result.years.iter().map(|y| y.to_string()));
    wtr.write_record(&header)?;
    for (label, vals) in indicator_rows(result) {
        let mut record = vec![label];
        record.extend(vals.iter().map(|v| format!("{v:.2}")));
        wtr.write_record(&record)?;
    }

    wtr.write_record([""])?;
    wtr.write_record(["# Impacts (% deviation from baseline)"])?;
    for (var, per_year) in &result.impacts {
        let vals: Vec<f64> = result
            .years
            .iter()
            .map(|y| per_year.get(y).copied().unwrap_or(0.0))
            .collect();
        if vals.iter().any(|v| v.abs() > IMPACT_EXPORT_THRESHOLD) {
            let mut record = vec![var.clone()];
            record.extend(vals.iter().map(|v| format!("{v:.4}")));
            wtr.write_record(&record)?;
        }
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("csv write failed: {e}")))?;
    Ok(bytes)
}

pub async fn export_csv(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SimulationRequest>,
) -> Result<Response, ApiError> {
    let name = request.name.clone();
    let result = run(&state, request).await?;
    let csv = build_csv(&result)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=ml2_{name}.csv"),
            ),
        ],
        csv,
    )
        .into_response())
}

fn build_xlsx(result: &SimulationOutput) -> Result<Vec<u8>, ApiError> {
    let mut book = umya_spreadsheet::new_file();

    // Indicators sheet
    {
        let sheet = book
            .get_sheet_by_name_mut("Sheet1")
            .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("missing default sheet")))?;
        sheet.set_name("Indicators");
        sheet.get_cell_mut((1, 1)).set_value("Year");
        for (i, year) in result.years.iter().enumerate() {
            sheet
                .get_cell_mut((1, i as u32 + 2))
                .set_value_number(*year as f64);
        }
        for (col, (label, vals)) in indicator_rows(result).into_iter().enumerate() {
            let col = col as u32 + 2;
            sheet.get_cell_mut((col, 1)).set_value(label);
            for (i, v) in vals.into_iter().enumerate() {
                sheet.get_cell_mut((col, i as u32 + 2)).set_value_number(v);
            }
        }
    }

    // Impacts sheet: one row per variable with a non-negligible impact
    {
        let sheet = book
            .new_sheet("Impacts")
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("sheet error: {e}")))?;
        sheet.get_cell_mut((1, 1)).set_value("Variable");
        for (i, year) in result.years.iter().enumerate() {
            sheet
                .get_cell_mut((i as u32 + 2, 1))
                .set_value_number(*year as f64);
        }
        let mut row = 2u32;
        for (var, per_year) in &result.impacts {
            let vals: Vec<f64> = result
                .years
                .iter()
                .map(|y| per_year.get(y).copied().unwrap_or(0.0))
                .collect();
            if vals.iter().any(|v| v.abs() > IMPACT_EXPORT_THRESHOLD) {
                sheet.get_cell_mut((1, row)).set_value(var.clone());
                for (i, v) in vals.into_iter().enumerate() {
                    sheet.get_cell_mut((i as u32 + 2, row)).set_value_number(v);
                }
                row += 1;
            }
        }
    }

    // Levels sheet: scenario levels of the headline variables
    {
        let sheet = book
            .new_sheet("Levels")
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("sheet error: {e}")))?;
        sheet.get_cell_mut((1, 1)).set_value("Variable");
        let mut years: Vec<i32> = Vec::new();
        if let Some(first) = result.levels.values().next() {
            years = first.keys().copied().collect();
        }
        for (i, year) in years.iter().enumerate() {
            sheet
                .get_cell_mut((i as u32 + 2, 1))
                .set_value_number(*year as f64);
        }
        for (row, (var, per_year)) in result.levels.iter().enumerate() {
            let row = row as u32 + 2;
            sheet.get_cell_mut((1, row)).set_value(var.clone());
            for (i, year) in years.iter().enumerate() {
                if let Some(v) = per_year.get(year) {
                    sheet.get_cell_mut((i as u32 + 2, row)).set_value_number(*v);
                }
            }
        }
    }

    let mut cursor = std::io::Cursor::new(Vec::new());
    umya_spreadsheet::writer::xlsx::write_writer(&book, &mut cursor)
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("xlsx write failed: {e}")))?;
    Ok(cursor.into_inner())
}

pub async fn export_excel(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SimulationRequest>,
) -> Result<Response, ApiError> {
    let name = request.name.clone();
    let result = run(&state, request).await?;
    let bytes = build_xlsx(&result)?;

    Ok((
        [
            (
                header::CONTENT_TYPE,
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=ml2_{name}.xlsx"),
            ),
        ],
        bytes,
    )
        .into_response())
}
