//! Config Validator CLI
//!
//! Validates single documents or a whole project directory.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use control_config_validator::config::OutputFormat;
use control_config_validator::{
    loader, validate_address_map, validate_config, validate_control_maps, validate_devices,
    validate_project, Dialect, Level, ProjectReport, Status, ValidationResult, ValidatorConfig,
};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "config-validator")]
#[command(about = "Validate controller configuration documents")]
#[command(version)]
struct Cli {
    /// Settings file (validator.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format, overriding the settings file
    #[arg(short, long, global = true, value_enum)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a device inventory
    Devices { file: PathBuf },

    /// Validate an address map
    AddressMap {
        file: PathBuf,
        /// Map type, e.g. "Modbus TCP/IP" or "CANbus"
        #[arg(short, long)]
        map_type: String,
        /// Require the precharge contactor measurement registers
        #[arg(long)]
        contactor_feedback: bool,
    },

    /// Validate a control map
    ControlMap { file: PathBuf },

    /// Validate the controller config
    Config { file: PathBuf },

    /// Validate every JSON file of a project, including cross-file references
    Project {
        /// Files or directories
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Role override, e.g. `io.json=address-map:Digital I/O`
        #[arg(short, long = "assign")]
        assignments: Vec<String>,
    },

    /// List the supported address-map types
    Dialects,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(2);
        }
    }
}

fn read_json(path: &Path) -> anyhow::Result<Value> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
}

/// Returns whether the run passed
fn run(cli: Cli) -> anyhow::Result<bool> {
    let mut settings = ValidatorConfig::load_from(cli.config.as_deref()).context("loading settings")?;
    if let Some(format) = cli.format {
        settings.output.format = format;
    }

    let result = match cli.command {
        Commands::Devices { file } => validate_devices(&read_json(&file)?),
        Commands::AddressMap {
            file,
            map_type,
            contactor_feedback,
        } => validate_address_map(&read_json(&file)?, &map_type, contactor_feedback),
        Commands::ControlMap { file } => validate_control_maps(&read_json(&file)?),
        Commands::Config { file } => validate_config(&read_json(&file)?),
        Commands::Project { paths, assignments } => {
            let assignments = assignments
                .iter()
                .map(|a| loader::parse_assignment(a, settings.project.default_map_type))
                .collect::<Result<BTreeMap<_, _>, _>>()?;
            let files = loader::load_project(&paths, &settings.project, &assignments)?;
            let report = validate_project(&files);
            print_project(&report, &settings)?;
            return Ok(passed(report.status(), &settings));
        }
        Commands::Dialects => {
            for dialect in Dialect::ALL {
                println!("{}", dialect);
            }
            return Ok(true);
        }
    };

    print_result(&result, &settings)?;
    Ok(passed(result.status(), &settings))
}

fn passed(status: Status, settings: &ValidatorConfig) -> bool {
    match status {
        Status::Valid => true,
        Status::ValidWithWarnings => !settings.validation.fail_on_warnings,
        Status::Invalid => false,
    }
}

fn status_line(status: Status) -> String {
    match status {
        Status::Valid => format!("✅ {}", status),
        Status::ValidWithWarnings => format!("⚠️  {}", status),
        Status::Invalid => format!("❌ {}", status),
    }
}

fn print_findings(result: &ValidationResult, settings: &ValidatorConfig, indent: &str) {
    for finding in result.messages() {
        match finding.level {
            Level::Error => println!("{}❌ {}", indent, finding.message),
            Level::Warning if settings.output.show_warnings => {
                println!("{}⚠️  {}", indent, finding.message)
            }
            Level::Warning => {}
        }
    }
}

fn print_result(result: &ValidationResult, settings: &ValidatorConfig) -> anyhow::Result<()> {
    match settings.output.format {
        OutputFormat::Json => {
            let report = serde_json::json!({
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "status": result.status(),
                "result": result,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            print_findings(result, settings, "");
            println!("{}", status_line(result.status()));
        }
    }
    Ok(())
}

fn print_project(report: &ProjectReport, settings: &ValidatorConfig) -> anyhow::Result<()> {
    match settings.output.format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "status": report.status(),
                "project": report.project,
                "files": report.files,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Text => {
            if !report.project.is_empty() {
                println!("📦 Project");
                print_findings(&report.project, settings, "  ");
                println!();
            }
            for file in &report.files {
                println!("📄 {} ({})", file.name, file.role);
                print_findings(&file.result, settings, "  ");
                println!("  {}", status_line(file.result.status()));
                println!();
            }
            println!("Summary: {}", status_line(report.status()));
        }
    }
    Ok(())
}
