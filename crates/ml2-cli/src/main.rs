mod plot;

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ml2_core::model::instruments::INSTRUMENTS;
use ml2_core::{SimulationEngine, SimulationOutput};

#[derive(Parser)]
#[command(name = "ml2-cli", about = "ML2 macroeconometric policy simulation")]
struct Cli {
    /// Baseline panel JSON file
    #[arg(long, default_value = "data/baseline/baseline_variables.json", global = true)]
    baseline: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario and print or export the results
    Simulate {
        /// Instrument override, KEY=VALUE (repeatable), e.g. --set VIG_X=1000
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,

        /// Scenario name
        #[arg(long, default_value = "Scenario")]
        name: String,

        /// Output CSV file path (prints a summary to stdout if omitted)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output full simulation result as JSON
        #[arg(long)]
        json: Option<PathBuf>,

        /// Output chart image (PNG) file path
        #[arg(long)]
        chart: Option<PathBuf>,
    },

    /// Print baseline key indicators
    Baseline,

    /// List the policy instrument catalogue
    Instruments,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate { set, name, output, json, chart } => {
            let engine = load_engine(&cli.baseline)?;
            let overrides = parse_set_values(&set)?;
            eprintln!("Running '{name}'…");
            let result = engine.simulate(&overrides, &name)?;

            if let Some(path) = output {
                write_csv(&result, &path)?;
                eprintln!("Wrote {}", path.display());
            } else {
                print_summary(&result);
            }

            if let Some(path) = json {
                std::fs::write(&path, serde_json::to_string_pretty(&result)?)
                    .with_context(|| format!("Cannot write to {}", path.display()))?;
                eprintln!("Wrote {}", path.display());
            }

            if let Some(chart_path) = chart {
                plot::render_chart(&result, &chart_path)?;
                eprintln!("Wrote chart {}", chart_path.display());
            }
        }

        Commands::Baseline => {
            let engine = load_engine(&cli.baseline)?;
            let ind = engine.baseline_indicators();
            println!("{:>6}  {:>10}  {:>10}  {:>12}  {:>12}", "Year", "GDP gr.%", "Infl.%", "Deficit/GDP%", "Unempl.%");
            println!("{}", "-".repeat(58));
            for (i, year) in ind.years.iter().enumerate() {
                println!(
                    "{:>6}  {:>10.2}  {:>10.2}  {:>12.2}  {:>12.2}",
                    year, ind.gdp_growth[i], ind.inflation[i], ind.deficit_ratio[i], ind.unemployment[i]
                );
            }
        }

        Commands::Instruments => {
            println!(
                "{:<10} {:<26} {:>9} {:>9} {:>9}  {}",
                "Key", "Label", "Default", "Min", "Max", "Unit"
            );
            println!("{}", "-".repeat(86));
            for spec in INSTRUMENTS {
                println!(
                    "{:<10} {:<26} {:>9} {:>9} {:>9}  {}",
                    spec.key, spec.label, spec.default, spec.min, spec.max, spec.unit
                );
            }
        }
    }

    Ok(())
}

fn load_engine(baseline: &PathBuf) -> Result<SimulationEngine> {
    SimulationEngine::from_file(baseline)
        .with_context(|| format!("Cannot load baseline from {}", baseline.display()))
}

/// Parse repeated `KEY=VALUE` instrument overrides.
fn parse_set_values(pairs: &[String]) -> Result<BTreeMap<String, f64>> {
    let mut values = BTreeMap::new();
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .with_context(|| format!("Invalid --set '{pair}', expected KEY=VALUE"))?;
        let value: f64 = value
            .parse()
            .with_context(|| format!("Invalid numeric value in --set '{pair}'"))?;
        values.insert(key.to_string(), value);
    }
    Ok(values)
}

fn print_summary(result: &SimulationOutput) {
    println!("Scenario '{}'", result.name);
    println!(
        "{:>6}  {:>10}  {:>10}  {:>12}  {:>12}",
        "Year", "GDP gr.%", "Infl.%", "Deficit/GDP%", "Unempl.%"
    );
    println!("{}", "-".repeat(58));
    for (i, year) in result.years.iter().enumerate() {
        println!(
            "{:>6}  {:>10.2}  {:>10.2}  {:>12.2}  {:>12.2}",
            year,
            result.scenario.gdp_growth[i],
            result.scenario.inflation[i],
            result.scenario.deficit_ratio[i],
            result.scenario.unemployment[i]
        );
    }
    println!();
    println!("Convergence:");
    for report in &result.convergence {
        println!(
            "  {}: {:?} after {} iterations (residual {:.2e})",
            report.year, report.status, report.iterations, report.max_residual
        );
    }
}

/// Full scenario levels table, one row per year.
fn write_csv(result: &SimulationOutput, path: &PathBuf) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Cannot write to {}", path.display()))?;

    let vars: Vec<&String> = result.levels.keys().collect();
    let mut header = vec!["year".to_string()];
    header.extend(vars.iter().map(|v| v.to_string()));
    wtr.write_record(&header)?;

    let years: Vec<i32> = result
        .levels
        .values()
        .next()
        .map(|col| col.keys().copied().collect())
        .unwrap_or_default();
    for year in years {
        let mut record = vec![year.to_string()];
        for var in &vars {
            let value = result.levels[*var].get(&year).copied().unwrap_or(0.0);
            record.push(format!("{value:.6}"));
        }
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}
