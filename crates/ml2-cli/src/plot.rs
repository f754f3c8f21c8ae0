//! Baseline-vs-scenario indicator chart rendering.

use anyhow::Result;
use ml2_core::{KeyIndicators, SimulationOutput};
use plotters::prelude::*;

struct PanelConfig {
    title: &'static str,
    y_label: &'static str,
    extract: fn(&KeyIndicators) -> &[f64],
}

fn gdp_growth(ind: &KeyIndicators) -> &[f64] {
    &ind.gdp_growth
}

fn inflation(ind: &KeyIndicators) -> &[f64] {
    &ind.inflation
}

fn deficit_ratio(ind: &KeyIndicators) -> &[f64] {
    &ind.deficit_ratio
}

fn unemployment(ind: &KeyIndicators) -> &[f64] {
    &ind.unemployment
}

static PANELS: &[PanelConfig] = &[
    PanelConfig {
        title: "GDP Growth",
        y_label: "% y/y",
        extract: gdp_growth,
    },
    PanelConfig {
        title: "Inflation",
        y_label: "% y/y",
        extract: inflation,
    },
    PanelConfig {
        title: "Government Balance",
        y_label: "% of GDP",
        extract: deficit_ratio,
    },
    PanelConfig {
        title: "Unemployment",
        y_label: "%",
        extract: unemployment,
    },
];

const WIDTH: u32 = 1000;
const HEIGHT_PER_PANEL: u32 = 220;

const BASELINE_COLOR: RGBColor = RGBColor(31, 119, 180);
const SCENARIO_COLOR: RGBColor = RGBColor(214, 39, 40);

pub fn render_chart(result: &SimulationOutput, path: &std::path::Path) -> Result<()> {
    let n_panels = PANELS.len() as u32;
    let total_height = HEIGHT_PER_PANEL * n_panels + 60;

    let root = BitMapBackend::new(path, (WIDTH, total_height)).into_drawing_area();
    root.fill(&WHITE)?;

    let (header, body) = root.split_vertically(60);
    header.fill(&WHITE)?;
    header.draw_text(
        &format!("Scenario '{}' vs baseline", result.name),
        &TextStyle::from(("sans-serif", 24).into_font()).color(&BLACK),
        (20, 18),
    )?;

    let panel_areas = body.split_evenly((PANELS.len(), 1));

    let x_range = {
        let first = result.years.first().copied().unwrap_or(0);
        let last = result.years.last().copied().unwrap_or(1);
        first..last
    };

    for (cfg, area) in PANELS.iter().zip(panel_areas.iter()) {
        let baseline = (cfg.extract)(&result.baseline);
        let scenario = (cfg.extract)(&result.scenario);

        let (y_min, y_max) = baseline
            .iter()
            .chain(scenario)
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(mn, mx), &v| {
                (mn.min(v), mx.max(v))
            });
        let span = (y_max - y_min).max(0.1);
        let margin = span * 0.1;
        let y_range = (y_min - margin)..(y_max + margin);

        let mut chart = ChartBuilder::on(area)
            .caption(cfg.title, ("sans-serif", 16).into_font())
            .margin(8)
            .x_label_area_size(30)
            .y_label_area_size(55)
            .build_cartesian_2d(x_range.clone(), y_range)?;

        chart
            .configure_mesh()
            .x_desc("Year")
            .y_desc(cfg.y_label)
            .x_label_formatter(&|v| format!("{v}"))
            .draw()?;

        for (vals, color, label) in [
            (baseline, BASELINE_COLOR, "Baseline"),
            (scenario, SCENARIO_COLOR, "Scenario"),
        ] {
            let data: Vec<(i32, f64)> = result
                .years
                .iter()
                .zip(vals)
                .map(|(&t, &v)| (t, v))
                .collect();
            chart
                .draw_series(LineSeries::new(data, color.stroke_width(2)))?
                .label(label)
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()?;
    Ok(())
}
