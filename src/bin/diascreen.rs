//! Diascreen CLI - Command-line interface for the screening engine
//!
//! Commands:
//! - screen: Run a JSON form submission through the pipeline
//! - form: Interactive single-page form on a TTY
//! - doctor: Diagnose artifact health and configuration
//! - schema: Print input/output schema information

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use diascreen::form::FormInput;
use diascreen::model::LogisticModel;
use diascreen::pipeline::{ScreenEngine, CLASSIFIER_FILE, SCALER_FILE};
use diascreen::scaler::StandardScaler;
use diascreen::types::FEATURE_NAMES;
use diascreen::{ScreenError, DIASCREEN_VERSION, PRODUCER_NAME};

/// Diascreen - on-device diabetes risk screening engine
#[derive(Parser)]
#[command(name = "diascreen")]
#[command(version = DIASCREEN_VERSION)]
#[command(about = "Screen health measurements for diabetes risk", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a JSON form submission through the pipeline
    Screen {
        /// Input file path with a form submission JSON object (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Directory containing scaler.json and classifier.json
        #[arg(long, default_value = "models")]
        models: PathBuf,
    },

    /// Fill in the form interactively on a TTY
    Form {
        /// Directory containing scaler.json and classifier.json
        #[arg(long, default_value = "models")]
        models: PathBuf,
    },

    /// Diagnose artifact health and configuration
    Doctor {
        /// Directory containing scaler.json and classifier.json
        #[arg(long, default_value = "models")]
        models: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print schema information
    Schema {
        /// Schema to print (input or output)
        #[arg(value_enum)]
        schema_type: SchemaType,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Plain-text result page
    Text,
    /// Compact JSON report
    Json,
    /// Pretty-printed JSON report
    JsonPretty,
}

#[derive(Clone, ValueEnum)]
enum SchemaType {
    /// Input schema (form submission)
    Input,
    /// Output schema (screening report)
    Output,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), DiascreenCliError> {
    match cli.command {
        Commands::Screen {
            input,
            format,
            models,
        } => cmd_screen(&input, format, &models),

        Commands::Form { models } => cmd_form(&models),

        Commands::Doctor { models, json } => cmd_doctor(&models, json),

        Commands::Schema { schema_type } => cmd_schema(schema_type),
    }
}

fn cmd_screen(
    input: &Path,
    format: OutputFormat,
    models: &Path,
) -> Result<(), DiascreenCliError> {
    let input_data = if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(input)?
    };

    let sample = FormInput::from_json(&input_data)?.into_sample();
    let engine = ScreenEngine::from_artifact_dir(models)?;

    // Below the age gate the submission is accepted and nothing is printed.
    let Some(report) = engine.screen(&sample) else {
        return Ok(());
    };

    let output = match format {
        OutputFormat::Text => report.render_text(),
        OutputFormat::Json => serde_json::to_string(&report)? + "\n",
        OutputFormat::JsonPretty => serde_json::to_string_pretty(&report)? + "\n",
    };
    print!("{output}");

    Ok(())
}

fn cmd_form(models: &Path) -> Result<(), DiascreenCliError> {
    if !atty::is(atty::Stream::Stdin) {
        return Err(DiascreenCliError::NotATty);
    }

    let engine = ScreenEngine::from_artifact_dir(models)?;

    println!("Diabetes Prediction System");
    println!("==========================");
    println!("Enter your health data below to check your diabetes risk.");
    println!("Press Enter to leave a field at 0.");
    println!();

    let sample = FormInput {
        pregnancies: prompt_count("Pregnancies")?,
        glucose: prompt_count("Glucose (mg/dL)")?,
        blood_pressure: prompt_count("Blood Pressure (mm Hg)")?,
        skin_thickness: prompt_count("Skin Thickness (mm)")?,
        insulin: prompt_count("Insulin (µU/mL)")?,
        bmi: prompt_float("BMI")?,
        diabetes_pedigree_function: prompt_float("Diabetes Pedigree Function")?,
        age: prompt_count("Age")?,
    }
    .into_sample();

    println!();
    // Below the age gate the submission is accepted and nothing is printed.
    if let Some(report) = engine.screen(&sample) {
        print!("{}", report.render_text());
    }

    Ok(())
}

/// Prompt for a non-negative integer field, re-asking on unparsable input
fn prompt_count(label: &str) -> Result<u32, DiascreenCliError> {
    loop {
        let line = prompt_line(label)?;
        if line.is_empty() {
            return Ok(0);
        }
        match line.parse::<u32>() {
            Ok(value) => return Ok(value),
            Err(_) => println!("  Please enter a whole number >= 0."),
        }
    }
}

/// Prompt for a non-negative float field, re-asking on unparsable input
fn prompt_float(label: &str) -> Result<f64, DiascreenCliError> {
    loop {
        let line = prompt_line(label)?;
        if line.is_empty() {
            return Ok(0.0);
        }
        match line.parse::<f64>() {
            Ok(value) if value >= 0.0 && value.is_finite() => return Ok(value),
            _ => println!("  Please enter a number >= 0."),
        }
    }
}

fn prompt_line(label: &str) -> Result<String, DiascreenCliError> {
    print!("{label}: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn cmd_doctor(models: &Path, json: bool) -> Result<(), DiascreenCliError> {
    let mut checks: Vec<DoctorCheck> = Vec::new();

    checks.push(DoctorCheck {
        name: "diascreen_version".to_string(),
        status: CheckStatus::Ok,
        message: format!("Diascreen version {DIASCREEN_VERSION}"),
    });

    checks.push(artifact_check(
        "scaler",
        &models.join(SCALER_FILE),
        |json| StandardScaler::from_json(json).map(|_| ()),
    ));
    checks.push(artifact_check(
        "classifier",
        &models.join(CLASSIFIER_FILE),
        |json| LogisticModel::from_json(json).map(|_| ()),
    ));

    let stdin_check = if atty::is(atty::Stream::Stdin) {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a TTY (interactive form available)".to_string(),
        }
    } else {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Warning,
            message: "stdin is not a TTY (interactive form unavailable)".to_string(),
        }
    };
    checks.push(stdin_check);

    let report = DoctorReport {
        producer: PRODUCER_NAME.to_string(),
        version: DIASCREEN_VERSION.to_string(),
        checks,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Diascreen Doctor Report");
        println!("=======================");
        println!("Producer: {}", report.producer);
        println!("Version:  {}", report.version);
        println!("\nChecks:");

        for check in &report.checks {
            let status_icon = match check.status {
                CheckStatus::Ok => "[OK]",
                CheckStatus::Warning => "[WARN]",
                CheckStatus::Error => "[ERR]",
            };
            println!("  {} {}: {}", status_icon, check.name, check.message);
        }
    }

    let has_errors = report
        .checks
        .iter()
        .any(|c| matches!(c.status, CheckStatus::Error));
    if has_errors {
        Err(DiascreenCliError::DoctorFailed)
    } else {
        Ok(())
    }
}

fn artifact_check(
    name: &str,
    path: &Path,
    load: impl Fn(&str) -> Result<(), ScreenError>,
) -> DoctorCheck {
    if !path.exists() {
        return DoctorCheck {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: format!("Artifact {} does not exist", path.display()),
        };
    }

    match fs::read_to_string(path) {
        Ok(content) => match load(&content) {
            Ok(()) => DoctorCheck {
                name: name.to_string(),
                status: CheckStatus::Ok,
                message: format!("Artifact {} is valid", path.display()),
            },
            Err(e) => DoctorCheck {
                name: name.to_string(),
                status: CheckStatus::Error,
                message: format!("Invalid artifact: {e}"),
            },
        },
        Err(e) => DoctorCheck {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: format!("Cannot read artifact: {e}"),
        },
    }
}

fn cmd_schema(schema_type: SchemaType) -> Result<(), DiascreenCliError> {
    match schema_type {
        SchemaType::Input => {
            println!("Input Schema: form submission (JSON object)");
            println!();
            println!("Eight numeric fields, all optional, absent fields read as 0:");
            println!();
            for name in FEATURE_NAMES {
                println!("  - {name}");
            }
            println!();
            println!("pregnancies, glucose, blood_pressure, skin_thickness, insulin and");
            println!("age are non-negative integers; bmi and diabetes_pedigree_function");
            println!("are non-negative numbers (negatives are clamped to 0).");
        }
        SchemaType::Output => {
            println!("Output Schema: screening report");
            println!();
            println!("The report contains:");
            println!();
            println!("- producer: {{ name, version, instance_id }}");
            println!("- produced_at: UTC timestamp");
            println!("- prediction: {{ label, probability }}");
            println!("- headline: label plus risk probability to two decimal places");
            println!("- explanations: four factor entries in fixed order");
            println!("  (Glucose Level, BMI, Insulin Level, Age)");
            println!("- recommendations: three lines when suspected, two otherwise");
            println!();
            println!("Submissions with age <= 10 produce no report.");
        }
    }

    Ok(())
}

// Error types

#[derive(Debug)]
enum DiascreenCliError {
    Io(io::Error),
    Screen(ScreenError),
    Json(serde_json::Error),
    NotATty,
    DoctorFailed,
}

impl From<io::Error> for DiascreenCliError {
    fn from(e: io::Error) -> Self {
        DiascreenCliError::Io(e)
    }
}

impl From<ScreenError> for DiascreenCliError {
    fn from(e: ScreenError) -> Self {
        DiascreenCliError::Screen(e)
    }
}

impl From<serde_json::Error> for DiascreenCliError {
    fn from(e: serde_json::Error) -> Self {
        DiascreenCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<DiascreenCliError> for CliError {
    fn from(e: DiascreenCliError) -> Self {
        match e {
            DiascreenCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            DiascreenCliError::Screen(e) => CliError {
                code: "ARTIFACT_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Run 'diascreen doctor' to validate the artifacts".to_string()),
            },
            DiascreenCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            DiascreenCliError::NotATty => CliError {
                code: "NOT_A_TTY".to_string(),
                message: "The interactive form requires a terminal".to_string(),
                hint: Some("Pipe a JSON submission to 'diascreen screen -i -' instead".to_string()),
            },
            DiascreenCliError::DoctorFailed => CliError {
                code: "DOCTOR_FAILED".to_string(),
                message: "One or more health checks failed".to_string(),
                hint: Some("Review the doctor report for details".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct DoctorReport {
    producer: String,
    version: String,
    checks: Vec<DoctorCheck>,
}

#[derive(serde::Serialize)]
struct DoctorCheck {
    name: String,
    status: CheckStatus,
    message: String,
}

#[derive(serde::Serialize)]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}
