//! # Metacentre CLI Application
//!
//! Terminal front end for the stability engine.
//!
//! ## Usage
//!
//! ```text
//! stab_cli                 interactive intact-stability check
//! stab_cli request.json    run a request document, print the outcome as JSON
//! stab_cli -               read the request document from stdin
//! ```
//!
//! Log output goes to stderr and is controlled by `RUST_LOG` (default `info`).

use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::{DateTime, Utc};
use clap::Parser;
use serde::Serialize;
use stab_core::calculations::criteria::VesselCategory;
use stab_core::calculations::intact::{calculate, IntactInput, IntactResult};
use stab_core::calculations::warnings::StabilityWarning;
use stab_core::{run, CalcError, CalcResult, ScenarioOutcome, StabilityRequest, StabilitySettings, VesselState};
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(author, version, about = "Ship stability calculator")]
struct Cli {
    /// Request document to run; `-` reads it from stdin. Without it, runs an
    /// interactive intact-stability check.
    request: Option<PathBuf>,
}

impl Cli {
    fn reads_stdin(&self) -> bool {
        self.request.as_deref() == Some(Path::new("-"))
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match cli.request.as_deref() {
        None => {
            run_interactive();
            ExitCode::SUCCESS
        }
        Some(_) if cli.reads_stdin() => {
            let mut text = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut text) {
                error!("cannot read request from stdin: {}", e);
                return ExitCode::FAILURE;
            }
            run_request(&text)
        }
        Some(path) => match fs::read_to_string(path) {
            Ok(text) => run_request(&text),
            Err(e) => {
                error!(path = %path.display(), "cannot read request file: {}", e);
                ExitCode::FAILURE
            }
        },
    }
}

// ============================================================================
// Request documents
// ============================================================================

/// Outcome of one request, stamped with when and by what it was produced.
#[derive(Debug, Serialize)]
struct CalculationRecord<'a> {
    run_id: Uuid,
    calculated_at: DateTime<Utc>,
    engine_version: &'static str,
    label: &'a str,
    outcome: ScenarioOutcome,
}

impl<'a> CalculationRecord<'a> {
    fn new(request: &'a StabilityRequest, outcome: ScenarioOutcome) -> Self {
        CalculationRecord {
            run_id: Uuid::new_v4(),
            calculated_at: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION"),
            label: &request.label,
            outcome,
        }
    }
}

fn execute(text: &str) -> CalcResult<String> {
    let request = StabilityRequest::from_json_str(text)?;
    info!(label = %request.label, scenario = request.scenario.calc_type(), "running request");

    let outcome = run(&request)?;
    let record = CalculationRecord::new(&request, outcome);
    Ok(serde_json::to_string_pretty(&record)?)
}

fn run_request(text: &str) -> ExitCode {
    match execute(text) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            print_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn print_error(e: &CalcError) {
    eprintln!("Error: {}", e);
    if let Ok(json) = serde_json::to_string_pretty(e) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
}

// ============================================================================
// Interactive check
// ============================================================================

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    parse_or_default(&input, default)
}

fn parse_or_default(input: &str, default: f64) -> f64 {
    input.trim().parse().unwrap_or(default)
}

/// Category for a 1-based menu choice; anything else keeps general cargo.
fn category_from_choice(choice: f64) -> VesselCategory {
    let categories = VesselCategory::all();
    if choice.fract() == 0.0 && choice >= 1.0 && choice <= categories.len() as f64 {
        categories[choice as usize - 1]
    } else {
        VesselCategory::default()
    }
}

fn prompt_category() -> VesselCategory {
    println!("Vessel category:");
    for (i, category) in VesselCategory::all().iter().enumerate() {
        println!("  {}. {}", i + 1, category.display_name());
    }
    category_from_choice(prompt_f64("Select category [1]: ", 1.0))
}

fn run_interactive() {
    println!("Metacentre CLI - Ship Stability Calculator");
    println!("==========================================");
    println!();

    let displacement_t = prompt_f64("Enter displacement (t) [25000.0]: ", 25_000.0);
    let km_m = prompt_f64("Enter KM (m) [8.5]: ", 8.5);
    let kg_m = prompt_f64("Enter KG (m) [7.2]: ", 7.2);
    let breadth_m = prompt_f64("Enter breadth (m) [32.0]: ", 32.0);
    println!();
    let vessel_category = prompt_category();

    let vessel = VesselState::new(displacement_t, km_m, kg_m);
    let input = IntactInput {
        breadth_m: Some(breadth_m),
        ..IntactInput::default()
    };
    let settings = StabilitySettings {
        vessel_category,
        ..StabilitySettings::default()
    };

    println!();
    println!("Calculating intact stability ({} criteria)...", vessel_category.display_name());
    println!();

    match calculate(&vessel, &input, &settings) {
        Ok(result) => {
            print_intact_report(&vessel, &result);

            println!();
            println!("JSON Output (for API use):");
            if let Ok(json) = serde_json::to_string_pretty(&result) {
                println!("{}", json);
            }
        }
        Err(e) => print_error(&e),
    }
}

fn print_intact_report(vessel: &VesselState, result: &IntactResult) {
    let evaluation = &result.evaluation;

    println!("═══════════════════════════════════════");
    println!("  INTACT STABILITY RESULTS");
    println!("═══════════════════════════════════════");
    println!();
    println!("Condition:");
    println!("  Category:     {}", result.vessel_category.display_name());
    println!("  Displacement: {:.0} t", vessel.displacement_t);
    println!("  KM / KG:      {:.3} / {:.3} m", vessel.km_m, vessel.kg_m);
    println!("  GM:           {:.3} m", result.gm_fluid_m);
    match result.roll_period_s {
        Some(period) => println!("  Roll period:  {:.1} s", period),
        None => println!("  Roll period:  n/a (GM ≤ 0)"),
    }
    println!();
    println!("Criteria:");
    for criterion in &evaluation.criteria {
        println!(
            "  {:<16} {:>8.3} ≥ {:<6.3} {:<6} {:>5.1}% {:<6} {}",
            criterion.criterion.label(),
            criterion.value,
            criterion.required_threshold,
            criterion.criterion.unit(),
            criterion.score_percent,
            status_icon(criterion.passed),
            criterion.criterion.reference(result.vessel_category)
        );
    }

    if !result.warnings.is_empty() {
        println!();
        println!("Warnings:");
        for warning in &result.warnings {
            println!("  - {}", describe_warning(warning));
        }
    }

    println!();
    println!("═══════════════════════════════════════");
    println!(
        "  RESULT: {} ({}/{} criteria, score {:.0}%)",
        if evaluation.all_passed { "PASS" } else { "FAIL" },
        evaluation.passed_count,
        evaluation.total_count,
        evaluation.overall_score_percent
    );
    println!("═══════════════════════════════════════");
}

fn describe_warning(warning: &StabilityWarning) -> String {
    match warning {
        StabilityWarning::NegativeGm { gm_m } => format!("Negative GM ({:.3} m): vessel is unstable", gm_m),
        StabilityWarning::LowGm { gm_m } => format!("Low GM ({:.3} m)", gm_m),
        StabilityWarning::HighFreeSurface { correction_m } => {
            format!("High free-surface correction ({:.3} m)", correction_m)
        }
        StabilityWarning::LowVanishingAngle { angle_deg } => {
            format!("Righting arm vanishes at {:.0}°", angle_deg)
        }
        StabilityWarning::CriteriaFailed { failed_count } => format!("{} criteria not met", failed_count),
    }
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[FAIL]" }
}
