//! Cohab CLI - Command-line interface for the Cohab engine
//!
//! Commands:
//! - analyze: Compute social statistics from cleaned event records
//! - validate: Validate event record schema
//! - schema: Print schema information

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use cohab::following::{FollowingConfig, DEFAULT_ATTENTION_SPAN};
use cohab::pipeline::{ExperimentData, SocialAnalyzer};
use cohab::schema::{parse_array, parse_ndjson, EventPayload, EventRecord, SCHEMA_VERSION};
use cohab::types::Phase;
use cohab::{EngineError, ENGINE_VERSION};

/// Cohab - Social behavior statistics from RFID-tracked group housing
#[derive(Parser)]
#[command(name = "cohab")]
#[command(version = ENGINE_VERSION)]
#[command(about = "Compute co-occurrence and following statistics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute social statistics from cleaned event records
    Analyze {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long)]
        output: PathBuf,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Output format
        #[arg(long, default_value = "json-pretty")]
        output_format: OutputFormat,

        /// Phase window as NAME:START:END in seconds; repeatable. Defaults
        /// to one window spanning the whole recording.
        #[arg(long = "phase")]
        phases: Vec<String>,

        /// Maximum follower-entry delay for following detection (seconds)
        #[arg(long, default_value_t = DEFAULT_ATTENTION_SPAN)]
        attention_span: f64,

        /// Grace period after the leader's exit (seconds)
        #[arg(long, default_value_t = 0.0)]
        exit_tolerance: f64,

        /// Restrict the analysis to these individuals; repeatable
        #[arg(long = "individual")]
        individuals: Vec<String>,
    },

    /// Validate event record schema
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output validation report as JSON
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
enum InputFormat {
    /// Newline-delimited JSON (one record per line)
    Ndjson,
    /// JSON array of records
    Json,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Compact JSON
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

#[derive(Clone, ValueEnum)]
enum SchemaType {
    /// Input schema (cohab.event.v1)
    Input,
    /// Output schema (the social report)
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

fn run(cli: Cli) -> Result<(), CohabCliError> {
    match cli.command {
        Commands::Analyze {
            input,
            output,
            input_format,
            output_format,
            phases,
            attention_span,
            exit_tolerance,
            individuals,
        } => cmd_analyze(
            &input,
            &output,
            input_format,
            output_format,
            &phases,
            attention_span,
            exit_tolerance,
            &individuals,
        ),

        Commands::Validate { input, json } => cmd_validate(&input, json),

        Commands::Schema { schema_type } => cmd_schema(schema_type),
    }
}

fn read_input(input: &PathBuf) -> Result<String, CohabCliError> {
    if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

/// Parse a NAME:START:END phase specification. The name must not contain
/// colons.
fn parse_phase_spec(spec: &str) -> Result<Phase, CohabCliError> {
    let parts: Vec<&str> = spec.split(':').collect();
    if parts.len() != 3 {
        return Err(CohabCliError::PhaseSpec(spec.to_string()));
    }
    let start: f64 = parts[1]
        .parse()
        .map_err(|_| CohabCliError::PhaseSpec(spec.to_string()))?;
    let end: f64 = parts[2]
        .parse()
        .map_err(|_| CohabCliError::PhaseSpec(spec.to_string()))?;
    let phase = Phase::new(parts[0], start, end);
    phase
        .validate()
        .map_err(|_| CohabCliError::PhaseSpec(spec.to_string()))?;
    Ok(phase)
}

/// One window covering every timestamp in the data
fn whole_recording_phase(records: &[EventRecord]) -> Option<Phase> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for record in records {
        let (lo, hi) = match &record.payload {
            EventPayload::Visit { start, end, .. } => (*start, *end),
            EventPayload::AntennaRead { time, .. } => (*time, *time),
        };
        min = min.min(lo);
        max = max.max(hi);
    }
    (min < max).then(|| Phase::new("all", min, max))
}

#[allow(clippy::too_many_arguments)]
fn cmd_analyze(
    input: &PathBuf,
    output: &PathBuf,
    input_format: InputFormat,
    output_format: OutputFormat,
    phase_specs: &[String],
    attention_span: f64,
    exit_tolerance: f64,
    individuals: &[String],
) -> Result<(), CohabCliError> {
    let input_data = read_input(input)?;

    let records = match input_format {
        InputFormat::Ndjson => parse_ndjson(&input_data)?,
        InputFormat::Json => parse_array(&input_data)?,
    };
    if records.is_empty() {
        return Err(CohabCliError::NoRecords);
    }

    let phases = if phase_specs.is_empty() {
        vec![whole_recording_phase(&records).ok_or(CohabCliError::NoRecords)?]
    } else {
        phase_specs
            .iter()
            .map(|spec| parse_phase_spec(spec))
            .collect::<Result<Vec<_>, _>>()?
    };

    let mut data = ExperimentData::from_records(&records)?;
    if !individuals.is_empty() {
        data.restrict_individuals(individuals)?;
    }

    let analyzer = SocialAnalyzer::new().with_following_config(FollowingConfig {
        attention_span,
        exit_tolerance,
    });
    let report = analyzer.analyze(&data, &phases)?;

    let output_data = match output_format {
        OutputFormat::Json => serde_json::to_string(&report)?,
        OutputFormat::JsonPretty => serde_json::to_string_pretty(&report)?,
    };

    if output.to_string_lossy() == "-" {
        println!("{output_data}");
    } else {
        fs::write(output, output_data)?;
    }

    Ok(())
}

fn cmd_validate(input: &PathBuf, json: bool) -> Result<(), CohabCliError> {
    let input_data = read_input(input)?;

    let mut total = 0usize;
    let mut errors: Vec<ValidationErrorDetail> = Vec::new();

    for (number, line) in input_data.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        total += 1;

        let outcome = serde_json::from_str::<EventRecord>(trimmed)
            .map_err(|e| e.to_string())
            .and_then(|record| record.validate().map_err(|e| e.to_string()));
        if let Err(error) = outcome {
            errors.push(ValidationErrorDetail {
                line: number + 1,
                error,
            });
        }
    }

    let report = ValidationReport {
        total_records: total,
        valid_records: total - errors.len(),
        invalid_records: errors.len(),
        errors,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Total records:   {}", report.total_records);
        println!("Valid records:   {}", report.valid_records);
        println!("Invalid records: {}", report.invalid_records);

        if !report.errors.is_empty() {
            println!("\nErrors:");
            for err in &report.errors {
                println!("  - line {}: {}", err.line, err.error);
            }
        }
    }

    if report.invalid_records > 0 {
        Err(CohabCliError::ValidationFailed(report.invalid_records))
    } else {
        Ok(())
    }
}

fn cmd_schema(schema_type: SchemaType) -> Result<(), CohabCliError> {
    match schema_type {
        SchemaType::Input => {
            println!("Input Schema: {SCHEMA_VERSION}");
            println!();
            println!("The cohab.event.v1 schema supports two record types:");
            println!();
            println!("1. visit - Continuous presence of an individual at a location");
            println!("   - location: compartment identifier");
            println!("   - start, end: seconds on the RFID clock, start <= end");
            println!();
            println!("2. antenna_read - Point registration at a single antenna");
            println!("   - antenna: antenna identifier");
            println!("   - time: seconds on the RFID clock");
            println!();
            println!("Every record carries schema_version and individual. Visit logs");
            println!("must be chronological and non-overlapping per individual; read");
            println!("streams must be in non-decreasing time order.");
        }
        SchemaType::Output => {
            println!("Output Schema: social report v1.0.0");
            println!();
            println!("The report contains:");
            println!();
            println!("- report_version: Schema version (1.0.0)");
            println!("- producer: {{ name, version, instance_id }}");
            println!("- provenance: {{ individuals, locations, computed_at_utc }}");
            println!("- windows: Array of phase windows containing:");
            println!("  - phase: {{ name, start, end }}, duration_sec");
            println!("  - time_together, expected_time_together: symmetric matrices");
            println!("  - solitary_time_sec: per-individual seconds alone");
            println!("  - following, following_time: leader-by-follower matrices");
            println!("  - following_spans_sec: event durations per ordered pair");
        }
    }

    Ok(())
}

// Error types

#[derive(Debug)]
enum CohabCliError {
    Io(io::Error),
    Engine(EngineError),
    Json(serde_json::Error),
    NoRecords,
    ValidationFailed(usize),
    PhaseSpec(String),
}

impl From<io::Error> for CohabCliError {
    fn from(e: io::Error) -> Self {
        CohabCliError::Io(e)
    }
}

impl From<EngineError> for CohabCliError {
    fn from(e: EngineError) -> Self {
        CohabCliError::Engine(e)
    }
}

impl From<serde_json::Error> for CohabCliError {
    fn from(e: serde_json::Error) -> Self {
        CohabCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<CohabCliError> for CliError {
    fn from(e: CohabCliError) -> Self {
        match e {
            CohabCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            CohabCliError::Engine(e) => CliError {
                code: "ENGINE_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Ensure input matches cohab.event.v1 schema".to_string()),
            },
            CohabCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            CohabCliError::NoRecords => CliError {
                code: "NO_RECORDS".to_string(),
                message: "No event records found in input".to_string(),
                hint: Some("Ensure input file is not empty".to_string()),
            },
            CohabCliError::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{count} records failed validation"),
                hint: Some("Fix validation errors and retry".to_string()),
            },
            CohabCliError::PhaseSpec(spec) => CliError {
                code: "PHASE_SPEC_ERROR".to_string(),
                message: format!("Cannot parse phase specification: {spec}"),
                hint: Some("Use NAME:START:END with START < END in seconds".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct ValidationReport {
    total_records: usize,
    valid_records: usize,
    invalid_records: usize,
    errors: Vec<ValidationErrorDetail>,
}

#[derive(serde::Serialize)]
struct ValidationErrorDetail {
    line: usize,
    error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_phase_spec() {
        let phase = parse_phase_spec("1 dark:0:43200").unwrap();
        assert_eq!(phase.name, "1 dark");
        assert_eq!(phase.start, 0.0);
        assert_eq!(phase.end, 43200.0);

        assert!(parse_phase_spec("no-times").is_err());
        assert!(parse_phase_spec("bad:10:5").is_err());
        assert!(parse_phase_spec("bad:x:5").is_err());
    }

    #[test]
    fn test_whole_recording_phase() {
        let records = vec![
            EventRecord {
                schema_version: SCHEMA_VERSION.to_string(),
                individual: "m".to_string(),
                payload: EventPayload::Visit {
                    location: "1".to_string(),
                    start: 2.0,
                    end: 3.0,
                },
            },
            EventRecord {
                schema_version: SCHEMA_VERSION.to_string(),
                individual: "m".to_string(),
                payload: EventPayload::AntennaRead {
                    antenna: "5".to_string(),
                    time: 40.0,
                },
            },
        ];
        let phase = whole_recording_phase(&records).unwrap();
        assert_eq!(phase.start, 2.0);
        assert_eq!(phase.end, 40.0);

        assert!(whole_recording_phase(&[]).is_none());
    }
}
