//! Colorful console output for contraction events.
//!
//! Provides a custom `tracing` layer that formats IntervalForge events with colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (contractor construction, batch start/end)
//! - **DEBUG**: One line per contraction call and per completed tuning phase
//! - **TRACE**: Individual variable shavings and disjunctions

use std::io::{self, Write};
use std::sync::OnceLock;
use std::time::Instant;

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

#[cfg(test)]
mod tests;

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();

/// Filter used when `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "intervalforge_contract=info,intervalforge=info";

/// Initializes the console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Does nothing if another global subscriber is already installed.
pub fn init() {
    INIT.get_or_init(|| {
        EPOCH.get_or_init(Instant::now);

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(ContractionConsoleLayer)
            .try_init();
    });
}

fn elapsed_secs() -> f64 {
    EPOCH.get().map_or(0.0, |epoch| epoch.elapsed().as_secs_f64())
}

/// A tracing layer that formats contraction events with colors.
pub struct ContractionConsoleLayer;

impl<S: Subscriber> Layer<S> for ContractionConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("intervalforge") {
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
    contractor: Option<String>,
    strategy: Option<String>,
    error: Option<String>,
    handled: Option<u64>,
    var: Option<u64>,
    slices: Option<u64>,
    window: Option<u64>,
    tuned_window: Option<u64>,
    tunings: Option<u64>,
    subcontractor_calls: Option<u64>,
    boxes: Option<u64>,
    infeasible_boxes: Option<u64>,
    duration_ms: Option<u64>,
    average: Option<f64>,
    ratio: Option<f64>,
    infeasible: Option<bool>,
    narrowed: Option<bool>,
    useful: Option<bool>,
    tuning: Option<bool>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        let s = s.trim_matches('"').to_string();
        match field.name() {
            "event" => self.event = Some(s),
            "contractor" => self.contractor = Some(s),
            "strategy" => self.strategy = Some(s),
            "error" => self.error = Some(s),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "handled" => self.handled = Some(value),
            "var" => self.var = Some(value),
            "slices" => self.slices = Some(value),
            "window" => self.window = Some(value),
            "tuned_window" => self.tuned_window = Some(value),
            "tunings" => self.tunings = Some(value),
            "subcontractor_calls" => self.subcontractor_calls = Some(value),
            "boxes" => self.boxes = Some(value),
            "infeasible_boxes" => self.infeasible_boxes = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        match field.name() {
            "average" => self.average = Some(value),
            "ratio" => self.ratio = Some(value),
            _ => {}
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        match field.name() {
            "infeasible" => self.infeasible = Some(value),
            "narrowed" => self.narrowed = Some(value),
            "useful" => self.useful = Some(value),
            "tuning" => self.tuning = Some(value),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "contractor" => self.contractor = Some(value.to_string()),
            "strategy" => self.strategy = Some(value.to_string()),
            "error" => self.error = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    match v.event.as_deref().unwrap_or("") {
        "build" => format_build(v),
        "batch_start" => format_batch_start(v),
        "batch_end" => format_batch_end(v),
        "contract" => format_contract(v),
        "tuning_end" => format_tuning_end(v),
        "shave" => format_shave(v, level),
        "cid" => format_cid(v, level),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs()).bright_black().to_string()
}

fn format_count(n: u64) -> String {
    n.to_formatted_string(&Locale::en)
}

fn format_build(v: &EventVisitor) -> String {
    let contractor = v.contractor.as_deref().unwrap_or("contractor");
    let handled = v.handled.unwrap_or(0);

    format!(
        "{} {} Built {} │ {} handled variables",
        format_elapsed(),
        "▶".bright_green().bold(),
        contractor.white().bold(),
        format_count(handled).bright_yellow()
    )
}

fn format_batch_start(v: &EventVisitor) -> String {
    format!(
        "{} {} Contracting {} boxes",
        format_elapsed(),
        "▶".bright_blue(),
        format_count(v.boxes.unwrap_or(0)).bright_yellow()
    )
}

fn format_batch_end(v: &EventVisitor) -> String {
    let boxes = v.boxes.unwrap_or(0);
    let infeasible = v.infeasible_boxes.unwrap_or(0);
    let pruned = if infeasible > 0 {
        format_count(infeasible).bright_red().bold().to_string()
    } else {
        format_count(infeasible).bright_green().to_string()
    };

    format!(
        "{} {} Batch complete │ {} │ {} boxes │ {} pruned",
        format_elapsed(),
        "■".bright_cyan().bold(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        format_count(boxes).white(),
        pruned
    )
}

fn format_contract(v: &EventVisitor) -> String {
    let contractor = v.contractor.as_deref().unwrap_or("contractor");
    let calls = v.subcontractor_calls.unwrap_or(0);

    let status = if v.infeasible.unwrap_or(false) {
        "INFEASIBLE".bright_red().bold().to_string()
    } else {
        "ok".bright_green().to_string()
    };

    let mut output = format!(
        "{} {} {} │ {}",
        format_elapsed(),
        "⚡".bright_cyan(),
        contractor.white().bold(),
        status
    );
    if let Some(window) = v.window {
        let phase = if v.tuning.unwrap_or(false) {
            " (tuning)"
        } else {
            ""
        };
        output.push_str(&format!(
            " │ window {}{}",
            format_count(window).bright_yellow(),
            phase
        ));
    }
    output.push_str(&format!(
        " │ {} sub-contractor calls",
        format_count(calls).bright_magenta()
    ));
    output
}

fn format_tuning_end(v: &EventVisitor) -> String {
    format!(
        "{} {} Tuning #{} ended │ window {} │ average {:.2}",
        format_elapsed(),
        "◀".bright_blue(),
        format_count(v.tunings.unwrap_or(0)).white(),
        format_count(v.tuned_window.unwrap_or(0)).bright_magenta().bold(),
        v.average.unwrap_or(0.0)
    )
}

fn format_shave(v: &EventVisitor, level: Level) -> String {
    if level != Level::TRACE {
        return String::new();
    }

    let icon = if v.narrowed.unwrap_or(false) || v.ratio.is_some_and(|r| r > 0.0) {
        "✓".bright_green().to_string()
    } else {
        "·".bright_black().to_string()
    };

    format!(
        "{} {} Shave x{:<4} │ {:<10} │ {} slices",
        format_elapsed(),
        icon,
        v.var.unwrap_or(0),
        v.strategy.as_deref().unwrap_or("-").bright_black(),
        format_count(v.slices.unwrap_or(0)).bright_black()
    )
}

fn format_cid(v: &EventVisitor, level: Level) -> String {
    if level != Level::TRACE {
        return String::new();
    }

    let useful = if v.useful.unwrap_or(false) {
        "useful".bright_green().to_string()
    } else {
        "useless".bright_black().to_string()
    };

    format!(
        "{} {} CID x{:<4} │ {}",
        format_elapsed(),
        "∪".bright_cyan(),
        v.var.unwrap_or(0),
        useful
    )
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}
