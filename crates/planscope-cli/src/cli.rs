use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use owo_colors::OwoColorize;
use planscope::{
    console, get_domain_classification_summary, parse_domain, parse_problem,
    validate_domain_problem, ConfigError, Frame, PlanParser, PlanscopeConfig, PlanscopeError,
    PlaybackState, Session,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Planscope(#[from] PlanscopeError),

    #[error("config: {0}")]
    Config(#[from] ConfigError),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("--step must be a positive number of seconds, got {0}")]
    InvalidStep(f64),
}

#[derive(Debug, Parser)]
#[command(name = "planscope", version, about = "Inspect PDDL domains and replay planner output")]
pub struct Cli {
    /// Configuration file; defaults apply when it does not exist
    #[arg(long, global = true, default_value = "planscope.toml")]
    config: PathBuf,

    /// Show debug events from the parsers and the player
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Classify the PDDL dialect of a domain
    Classify(ClassifyArgs),
    /// Cross-check a problem against its domain
    Validate(ValidateArgs),
    /// Parse planner output into a plan
    ParsePlan(ParsePlanArgs),
    /// Replay a plan headlessly and print the resulting frames
    Simulate(SimulateArgs),
}

#[derive(Debug, Args)]
struct ClassifyArgs {
    #[arg(value_name = "DOMAIN")]
    domain: PathBuf,
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    #[arg(value_name = "DOMAIN")]
    domain: PathBuf,
    #[arg(value_name = "PROBLEM")]
    problem: PathBuf,
}

#[derive(Debug, Args)]
struct ParsePlanArgs {
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,
    #[arg(long)]
    json: bool,
    /// Treat the input as a VAL-style solution file
    #[arg(long)]
    solution: bool,
}

#[derive(Debug, Args)]
struct SimulateArgs {
    #[arg(value_name = "DOMAIN")]
    domain: PathBuf,
    #[arg(value_name = "PROBLEM")]
    problem: PathBuf,
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,
    /// Wall-clock seconds per printed frame
    #[arg(long, default_value_t = 1.0)]
    step: f64,
    /// Print the single frame at this plan time instead of playing through
    #[arg(long)]
    seek: Option<f64>,
}

impl Cli {
    pub fn run(self, out: &mut impl Write) -> Result<ExitCode, CliError> {
        console::init_with_directive(if self.verbose {
            "planscope=debug"
        } else {
            "planscope=warn"
        });
        let config = load_config(&self.config)?;

        match self.command {
            Command::Classify(args) => classify(&args, out),
            Command::Validate(args) => validate(&args, out),
            Command::ParsePlan(args) => parse_plan(&args, &config, out),
            Command::Simulate(args) => simulate(&args, &config, out),
        }
    }
}

/// Missing file means defaults; a present but malformed file is an error.
fn load_config(path: &Path) -> Result<PlanscopeConfig, CliError> {
    if !path.exists() {
        return Ok(PlanscopeConfig::default());
    }
    let config = PlanscopeConfig::load(path)?;
    config.validate()?;
    Ok(config)
}

fn classify(args: &ClassifyArgs, out: &mut impl Write) -> Result<ExitCode, CliError> {
    let parsed = parse_domain(&fs::read_to_string(&args.domain)?)?;
    let summary = get_domain_classification_summary(&parsed.value);

    if args.json {
        let value = json!({
            "domain": parsed.value.name,
            "domain_type": summary.domain_type.tag(),
            "confidence": summary.confidence,
            "indicators": summary.indicators,
            "requirements": summary.requirements,
            "errors": parsed.errors,
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
        return Ok(ExitCode::SUCCESS);
    }

    writeln!(
        out,
        "{} {} ({:.0}% confidence)",
        parsed.value.name.bold(),
        summary.domain_type.tag().cyan(),
        summary.confidence * 100.0
    )?;
    for indicator in &summary.indicators {
        writeln!(out, "  {} {}", "-".dimmed(), indicator)?;
    }
    for error in &parsed.errors {
        writeln!(out, "  {} {}", "warning:".yellow(), error)?;
    }
    Ok(ExitCode::SUCCESS)
}

fn validate(args: &ValidateArgs, out: &mut impl Write) -> Result<ExitCode, CliError> {
    let domain = parse_domain(&fs::read_to_string(&args.domain)?)?;
    let problem = parse_problem(&fs::read_to_string(&args.problem)?)?;
    let issues: Vec<String> = domain
        .errors
        .iter()
        .chain(&problem.errors)
        .cloned()
        .chain(validate_domain_problem(&domain.value, &problem.value))
        .collect();

    if issues.is_empty() {
        writeln!(
            out,
            "{} {} matches {}",
            "ok".green().bold(),
            problem.value.name,
            domain.value.name
        )?;
        return Ok(ExitCode::SUCCESS);
    }
    for issue in &issues {
        writeln!(out, "{} {}", "issue:".yellow().bold(), issue)?;
    }
    Ok(ExitCode::FAILURE)
}

fn parse_plan(
    args: &ParsePlanArgs,
    config: &PlanscopeConfig,
    out: &mut impl Write,
) -> Result<ExitCode, CliError> {
    let text = fs::read_to_string(&args.output)?;
    let parser = PlanParser::new(config.parser.clone());
    let plan = if args.solution {
        parser.parse_solution(&text)?
    } else {
        parser.parse(&text)?
    };

    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&plan)?)?;
        return Ok(ExitCode::SUCCESS);
    }

    writeln!(
        out,
        "{} plan, {} actions, duration {:.3}",
        plan.dialect.tag().cyan(),
        plan.len(),
        plan.total_duration
    )?;
    for action in &plan.actions {
        writeln!(
            out,
            "{:>10.3}: {}  [{:.3}]",
            action.start_time,
            action.signature(),
            action.duration
        )?;
    }

    let metrics = &plan.metrics;
    if !metrics.is_empty() {
        writeln!(out, "{}", "metrics".bold())?;
        if let Some(cost) = metrics.plan_cost {
            writeln!(out, "  cost: {}", cost)?;
        }
        if let Some(nodes) = metrics.expanded_nodes {
            writeln!(out, "  expanded nodes: {}", nodes)?;
        }
        if let Some(states) = metrics.states_evaluated {
            writeln!(out, "  states evaluated: {}", states)?;
        }
        if let Some(time) = metrics.search_time.or(metrics.planning_time) {
            writeln!(out, "  search time: {:.3}s", time)?;
        }
    }
    writeln!(out, "quality: {:.3}", plan.quality())?;
    Ok(ExitCode::SUCCESS)
}

fn simulate(
    args: &SimulateArgs,
    config: &PlanscopeConfig,
    out: &mut impl Write,
) -> Result<ExitCode, CliError> {
    if !(args.step.is_finite() && args.step > 0.0) {
        return Err(CliError::InvalidStep(args.step));
    }
    let mut session = Session::from_files(&args.domain, &args.problem, &args.output, config)?;
    for diagnostic in session.diagnostics.all() {
        writeln!(out, "{} {}", "warning:".yellow(), diagnostic)?;
    }

    if let Some(time) = args.seek {
        let frame = session.player.seek(time);
        write_frame(out, &frame)?;
        return Ok(ExitCode::SUCCESS);
    }

    let step = Duration::from_secs_f64(args.step);
    session.player.play();
    let mut frame = session.player.frame();
    write_frame(out, &frame)?;
    while frame.state == PlaybackState::Playing {
        frame = session.player.advance(step);
        write_frame(out, &frame)?;
    }
    Ok(ExitCode::SUCCESS)
}

fn write_frame(out: &mut impl Write, frame: &Frame) -> io::Result<()> {
    let action = frame
        .current_action
        .as_ref()
        .map_or_else(|| "-".to_string(), |a| a.signature());
    write!(out, "t={:<8.3} {:<8} {}", frame.time, frame.state.tag(), action)?;
    for (key, value) in &frame.fluents {
        write!(out, "  {}={}", key, value)?;
    }
    writeln!(out)
}
