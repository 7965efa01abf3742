//! Colourful console output for planscope.
//!
//! Provides a custom `tracing` layer that renders the structured
//! `event = "..."` records emitted by the parsing and playback crates.
//!
//! ## Log Levels
//!
//! - **INFO**: lifecycle (parsed, classified, plan built, play/pause/reset)
//! - **DEBUG**: seeks and per-event completion
//! - **WARN**: skipped events and validation issues
//! - **TRACE**: per-tick progress (not rendered)

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_DIRECTIVE: &str = "planscope=info";

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initializes console output.
///
/// Safe to call multiple times - only the first call has effect.
pub fn init() {
    init_with_directive(DEFAULT_DIRECTIVE);
}

/// Initializes console output with a fallback filter directive such as
/// `planscope=debug`. `RUST_LOG` still takes precedence.
pub fn init_with_directive(directive: &str) {
    INIT.get_or_init(|| {
        EPOCH.get_or_init(Instant::now);
        print_banner();

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(PlanscopeConsoleLayer)
            .try_init();
    });
}

fn print_banner() {
    let mut stdout = io::stdout().lock();
    let _ = writeln!(
        stdout,
        "{} {}",
        "planscope".bright_cyan().bold(),
        format!("v{} - plan playback", VERSION).bright_white()
    );
    let _ = stdout.flush();
}

fn elapsed_secs() -> f64 {
    EPOCH.get().map_or(0.0, |epoch| epoch.elapsed().as_secs_f64())
}

/// A tracing layer that formats planscope events with colours.
pub struct PlanscopeConsoleLayer;

impl<S: Subscriber> Layer<S> for PlanscopeConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("planscope") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    event: Option<String>,
    message: Option<String>,
    name: Option<String>,
    dialect: Option<String>,
    rule: Option<String>,
    domain_type: Option<String>,
    from: Option<String>,
    to: Option<String>,
    action: Option<String>,
    id: Option<String>,
    kind: Option<String>,
    object: Option<String>,
    fluent: Option<String>,
    issue: Option<String>,
    source: Option<String>,
    actions: Option<u64>,
    processes: Option<u64>,
    events: Option<u64>,
    errors: Option<u64>,
    objects: Option<u64>,
    fluents: Option<u64>,
    started: Option<u64>,
    completed: Option<u64>,
    effects: Option<u64>,
    confidence: Option<f64>,
    total_duration: Option<f64>,
    cost: Option<f64>,
    time: Option<f64>,
    requested: Option<f64>,
    value: Option<f64>,
}

impl EventVisitor {
    fn set_text(&mut self, name: &str, value: String) {
        let slot = match name {
            "event" => &mut self.event,
            "message" => &mut self.message,
            "domain" | "problem" => &mut self.name,
            "dialect" => &mut self.dialect,
            "rule" => &mut self.rule,
            "domain_type" => &mut self.domain_type,
            "from" => &mut self.from,
            "to" => &mut self.to,
            "action" => &mut self.action,
            "id" => &mut self.id,
            "kind" => &mut self.kind,
            "object" => &mut self.object,
            "fluent" => &mut self.fluent,
            "issue" => &mut self.issue,
            "source" => &mut self.source,
            _ => return,
        };
        // `domain` is also the problem's domain field; the first one wins.
        if slot.is_none() {
            *slot = Some(value);
        }
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.set_text(field.name(), s.trim_matches('"').to_string());
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.set_text(field.name(), value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "actions" => self.actions = Some(value),
            "processes" => self.processes = Some(value),
            "events" => self.events = Some(value),
            "errors" => self.errors = Some(value),
            "objects" => self.objects = Some(value),
            "fluents" => self.fluents = Some(value),
            "started" => self.started = Some(value),
            "completed" => self.completed = Some(value),
            "effects" => self.effects = Some(value),
            _ => self.record_f64(field, value as f64),
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        match field.name() {
            "confidence" => self.confidence = Some(value),
            "total_duration" => self.total_duration = Some(value),
            "cost" => self.cost = Some(value),
            "time" => self.time = Some(value),
            "requested" => self.requested = Some(value),
            "value" => self.value = Some(value),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    let event = v.event.as_deref().unwrap_or("");

    match event {
        "domain_parsed" => format_domain_parsed(v),
        "problem_parsed" => format_problem_parsed(v),
        "domain_classified" => format_domain_classified(v),
        "planner_detected" => format_planner_detected(v),
        "plan_built" => format_plan_built(v, level),
        "plan_loaded" => format_plan_loaded(v),
        "playback" => format_playback(v),
        "seek" => format_seek(v),
        "event_started" | "event_completed" => format_event_transition(v, event),
        "event_skipped" => format_event_skipped(v),
        "fluent_clamped" => format_fluent_clamped(v),
        "validation_issue" => format_validation_issue(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn count(n: Option<u64>) -> String {
    n.unwrap_or(0).to_formatted_string(&Locale::en)
}

fn format_errors(errors: Option<u64>) -> String {
    match errors.unwrap_or(0) {
        0 => "clean".bright_green().to_string(),
        n => format!("{} issues", n.to_formatted_string(&Locale::en))
            .bright_red()
            .to_string(),
    }
}

fn format_domain_parsed(v: &EventVisitor) -> String {
    let name = v.name.as_deref().unwrap_or("?");
    let mut output = format!(
        "{} {} Domain {} │ {} actions",
        format_elapsed(),
        "▶".bright_green().bold(),
        name.white().bold(),
        count(v.actions).bright_yellow(),
    );
    if v.processes.unwrap_or(0) + v.events.unwrap_or(0) > 0 {
        output.push_str(&format!(
            " │ {} processes │ {} events",
            count(v.processes).bright_yellow(),
            count(v.events).bright_yellow()
        ));
    }
    output.push_str(&format!(" │ {}", format_errors(v.errors)));
    output
}

fn format_problem_parsed(v: &EventVisitor) -> String {
    let name = v.name.as_deref().unwrap_or("?");
    format!(
        "{} {} Problem {} │ {} objects │ {}",
        format_elapsed(),
        "▶".bright_green().bold(),
        name.white().bold(),
        count(v.objects).bright_yellow(),
        format_errors(v.errors)
    )
}

fn format_domain_classified(v: &EventVisitor) -> String {
    let domain_type = v.domain_type.as_deref().unwrap_or("UNKNOWN");
    let confidence = v.confidence.unwrap_or(0.0);
    let confidence = format!("{:.0}%", confidence * 100.0);
    let confidence = if domain_type == "UNKNOWN" {
        confidence.bright_red().to_string()
    } else {
        confidence.bright_green().to_string()
    };
    format!(
        "{} {} Classified as {} │ confidence {}",
        format_elapsed(),
        "◆".bright_cyan(),
        domain_type.bright_magenta().bold(),
        confidence
    )
}

fn format_planner_detected(v: &EventVisitor) -> String {
    format!(
        "{} {} Planner output {} │ rule {}",
        format_elapsed(),
        "◆".bright_cyan(),
        v.dialect.as_deref().unwrap_or("?").bright_magenta().bold(),
        v.rule.as_deref().unwrap_or("?").white()
    )
}

fn format_plan_built(v: &EventVisitor, level: Level) -> String {
    if level == Level::WARN {
        return format!(
            "{} {} No valid actions in {} output",
            format_elapsed(),
            "✗".bright_red().bold(),
            v.dialect.as_deref().unwrap_or("?")
        );
    }
    let mut output = format!(
        "{} {} Plan │ {} actions │ makespan {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        count(v.actions).bright_yellow(),
        format_time(v.total_duration.unwrap_or(0.0)).yellow()
    );
    if let Some(cost) = v.cost {
        output.push_str(&format!(" │ cost {}", format_number(cost).bright_magenta()));
    }
    if let Some(source) = &v.source {
        output.push_str(&format!(" │ {}", source.bright_black()));
    }
    output
}

fn format_plan_loaded(v: &EventVisitor) -> String {
    format!(
        "{} {} Loaded {} plan │ {} events │ {} fluents",
        format_elapsed(),
        "▶".bright_blue(),
        v.dialect.as_deref().unwrap_or("?").white().bold(),
        count(v.events).bright_yellow(),
        count(v.fluents).bright_yellow()
    )
}

fn format_playback(v: &EventVisitor) -> String {
    let time = format_time(v.time.unwrap_or(0.0));
    match (v.to.as_deref(), v.action.as_deref()) {
        (Some(to), _) => {
            let icon = match to {
                "playing" => "▶".bright_green().to_string(),
                "paused" => "❚❚".bright_yellow().to_string(),
                _ => "■".bright_red().to_string(),
            };
            format!(
                "{} {} {} → {} at {}",
                format_elapsed(),
                icon,
                v.from.as_deref().unwrap_or("?").bright_black(),
                to.white().bold(),
                time.yellow()
            )
        }
        (None, Some(action)) => format!(
            "{} {} {}",
            format_elapsed(),
            "↺".bright_blue(),
            action.white().bold()
        ),
        (None, None) => String::new(),
    }
}

fn format_seek(v: &EventVisitor) -> String {
    let mut output = format!(
        "{} {} Seek to {}",
        format_elapsed(),
        "⇥".bright_blue(),
        format_time(v.time.unwrap_or(0.0)).yellow()
    );
    if let Some(completed) = v.completed {
        output.push_str(&format!(
            " │ {} started │ {} completed",
            count(v.started).white(),
            completed.to_formatted_string(&Locale::en).bright_green()
        ));
    }
    output
}

fn format_event_transition(v: &EventVisitor, event: &str) -> String {
    let icon = if event == "event_started" {
        "→".bright_blue().to_string()
    } else {
        "✓".bright_green().to_string()
    };
    let mut output = format!(
        "    {} {:<8} {}",
        icon,
        v.kind.as_deref().unwrap_or("?").white(),
        v.id.as_deref().unwrap_or("?").bright_black()
    );
    if let Some(object) = &v.object {
        output.push_str(&format!(" │ {}", object.bright_cyan()));
    }
    if let Some(effects) = v.effects.filter(|n| *n > 0) {
        output.push_str(&format!(
            " │ {} effects",
            effects.to_formatted_string(&Locale::en).bright_magenta()
        ));
    }
    output
}

fn format_event_skipped(v: &EventVisitor) -> String {
    format!(
        "{} {} Skipped {} │ unknown object {}",
        format_elapsed(),
        "⚠".bright_yellow().bold(),
        v.id.as_deref().unwrap_or("?").white(),
        v.object.as_deref().unwrap_or("?").bright_red()
    )
}

fn format_fluent_clamped(v: &EventVisitor) -> String {
    format!(
        "    {} {} clamped {} → {}",
        "⚡".bright_yellow(),
        v.fluent.as_deref().unwrap_or("?").white(),
        format_number(v.requested.unwrap_or(0.0)).bright_black(),
        format_number(v.value.unwrap_or(0.0)).bright_yellow()
    )
}

fn format_validation_issue(v: &EventVisitor) -> String {
    format!(
        "{} {} {}",
        format_elapsed(),
        "⚠".bright_yellow().bold(),
        v.issue.as_deref().unwrap_or("?").yellow()
    )
}

fn format_time(secs: f64) -> String {
    if secs < 60.0 {
        format!("{:.3}s", secs)
    } else {
        let mins = (secs / 60.0).floor();
        format!("{}m {:.1}s", mins, secs - mins * 60.0)
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        (value as i64).to_formatted_string(&Locale::en)
    } else {
        format!("{:.3}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(1.5), "1.500s");
        assert_eq!(format_time(90.0), "1m 30.0s");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1234.0), "1,234");
        assert_eq!(format_number(-2.0), "-2");
        assert_eq!(format_number(12.003), "12.003");
    }

    #[test]
    fn test_unknown_event_is_silent() {
        let v = EventVisitor {
            event: Some("something_else".into()),
            ..EventVisitor::default()
        };
        assert!(format_event(&v, Level::INFO).is_empty());
        assert!(format_event(&EventVisitor::default(), Level::INFO).is_empty());
    }

    #[test]
    fn test_first_name_field_wins() {
        let mut v = EventVisitor::default();
        v.set_text("problem", "rovers-1".into());
        v.set_text("domain", "numeric-rovers".into());
        assert_eq!(v.name.as_deref(), Some("rovers-1"));
    }

    #[test]
    fn test_plan_built_line() {
        let v = EventVisitor {
            event: Some("plan_built".into()),
            actions: Some(1200),
            total_duration: Some(12.5),
            cost: Some(3.0),
            ..EventVisitor::default()
        };
        let line = format_event(&v, Level::INFO);
        assert!(line.contains("1,200"));
        assert!(line.contains("12.500s"));

        let warn = format_event(&v, Level::WARN);
        assert!(warn.contains("No valid actions"));
    }

    #[test]
    fn test_playback_transition_line() {
        let v = EventVisitor {
            event: Some("playback".into()),
            from: Some("stopped".into()),
            to: Some("playing".into()),
            time: Some(0.0),
            ..EventVisitor::default()
        };
        let line = format_event(&v, Level::INFO);
        assert!(line.contains("stopped"));
        assert!(line.contains("playing"));
    }

    #[test]
    fn test_event_lines() {
        let v = EventVisitor {
            event: Some("event_completed".into()),
            id: Some("action-0:numeric".into()),
            kind: Some("numeric".into()),
            effects: Some(2),
            ..EventVisitor::default()
        };
        let line = format_event(&v, Level::DEBUG);
        assert!(line.contains("action-0:numeric"));
        assert!(line.contains("effects"));

        let skipped = EventVisitor {
            event: Some("event_skipped".into()),
            id: Some("action-1:pick".into()),
            object: Some("r9".into()),
            ..EventVisitor::default()
        };
        assert!(format_event(&skipped, Level::WARN).contains("r9"));
    }

    #[test]
    fn test_classification_line() {
        let v = EventVisitor {
            event: Some("domain_classified".into()),
            domain_type: Some("PDDL_PLUS".into()),
            confidence: Some(0.95),
            ..EventVisitor::default()
        };
        let line = format_event(&v, Level::INFO);
        assert!(line.contains("PDDL_PLUS"));
        assert!(line.contains("95%"));
    }
}
