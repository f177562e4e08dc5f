//! Text and JSON rendering of statement results.

use std::fmt::Write as _;

use puma_engine::{ChaosReport, Outcome, Payload, Round, Success, TableSummary};
use puma_foundation::{Error, Table, Value};
use serde::Serialize;
use serde_json::json;

/// How many rows a table preview shows.
pub const PREVIEW_ROWS: usize = 5;

/// Longest cell shown in a preview before it is cut.
const MAX_CELL_WIDTH: usize = 24;

/// Whether a statement succeeded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// The statement succeeded.
    Ok,
    /// The statement failed.
    Error,
}

/// Machine-readable report of one statement.
#[derive(Clone, Debug, Serialize)]
pub struct Report {
    /// Success or failure.
    pub status: Status,
    /// Human-readable summary.
    pub message: String,
    /// Structured details, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl Report {
    /// Builds the report of an outcome.
    #[must_use]
    pub fn of(outcome: &Outcome) -> Self {
        match outcome {
            Ok(success) => Self {
                status: Status::Ok,
                message: success.message.clone(),
                data: payload_json(&success.payload),
            },
            Err(err) => Self {
                status: Status::Error,
                message: err.to_string(),
                data: Some(error_json(err)),
            },
        }
    }

    /// Serializes the report as one line of JSON.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            format!(r#"{{"status":"error","message":"unreportable result: {e}"}}"#)
        })
    }
}

/// Renders a success for the terminal.
#[must_use]
pub fn render_success(success: &Success) -> String {
    let mut out = success.message.clone();
    write_payload(&mut out, &success.payload, 1);
    out
}

/// Renders an error for the terminal: category, message, then context.
#[must_use]
pub fn render_error(err: &Error) -> String {
    let mut out = format!("{}: {err}", err.category());
    if let Some(context) = &err.context {
        let _ = write!(out, "\n{}", context.to_string().trim_end());
    }
    out
}

/// Renders the first rows of a table as aligned columns.
#[must_use]
pub fn preview(table: &Table, rows: usize) -> String {
    if table.column_count() == 0 {
        return "(no columns)".to_string();
    }
    let shown = rows.min(table.row_count());
    let grid: Vec<Vec<String>> = (0..shown)
        .map(|i| table.row(i).unwrap_or_default().iter().map(cell).collect())
        .collect();
    let names = table.column_names();
    let widths: Vec<usize> = names
        .iter()
        .enumerate()
        .map(|(c, name)| {
            grid.iter()
                .map(|row| row.get(c).map_or(0, |s| s.chars().count()))
                .chain(std::iter::once(name.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    push_row(&mut out, &names, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &rule, &widths);
    for row in &grid {
        push_row(&mut out, row, &widths);
    }
    let hidden = table.row_count() - shown;
    if hidden > 0 {
        let _ = writeln!(out, "... {hidden} more rows");
    }
    out.truncate(out.trim_end().len());
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    let _ = writeln!(out, "{}", line.join(" | ").trim_end());
}

fn cell(value: &Value) -> String {
    let text = match value {
        Value::Null => "null".to_string(),
        other => other.to_string(),
    };
    if text.chars().count() > MAX_CELL_WIDTH {
        let cut: String = text.chars().take(MAX_CELL_WIDTH - 3).collect();
        format!("{cut}...")
    } else {
        text
    }
}

fn write_payload(out: &mut String, payload: &Payload, depth: usize) {
    let indent = "  ".repeat(depth);
    match payload {
        Payload::None | Payload::Summary(_) | Payload::Terminated => {}
        Payload::Snapshot(columns) => {
            for (name, values) in columns {
                let shown: Vec<String> = values.iter().take(PREVIEW_ROWS).map(cell).collect();
                let more = if values.len() > PREVIEW_ROWS { ", ..." } else { "" };
                let _ = write!(out, "\n{indent}{name}: [{}{more}]", shown.join(", "));
            }
        }
        Payload::Pair(left, right) => {
            write_step(out, 1, left, depth);
            write_step(out, 2, right, depth);
        }
        Payload::Repeated(steps) => {
            for (i, step) in steps.iter().enumerate() {
                write_step(out, i + 1, step, depth);
            }
        }
        Payload::Timed { last, .. } => {
            let _ = write!(out, "\n{indent}last: {}", outcome_line(last));
        }
        Payload::Chaos(report) => {
            let first = report.first_kept();
            if first > 1 {
                let _ = write!(out, "\n{indent}... {} earlier rounds not shown", first - 1);
            }
            for (i, round) in report.rounds.iter().enumerate() {
                let _ = write!(out, "\n{indent}{}. {}", first + i, round_line(round));
            }
        }
    }
}

fn write_step(out: &mut String, index: usize, step: &Outcome, depth: usize) {
    let indent = "  ".repeat(depth);
    let _ = write!(out, "\n{indent}{index}. {}", outcome_line(step));
}

fn outcome_line(outcome: &Outcome) -> String {
    match outcome {
        Ok(success) => format!("ok: {success}"),
        Err(err) => format!("{}: {err}", err.category()),
    }
}

fn round_line(round: &Round) -> String {
    match round {
        Round::Applied(mutation) => format!("{mutation}"),
        Round::Skipped { mutation, reason } => format!("{mutation} skipped ({reason})"),
        Round::Failed { mutation, message } => format!("{mutation} failed: {message}"),
    }
}

fn payload_json(payload: &Payload) -> Option<serde_json::Value> {
    match payload {
        Payload::None => None,
        Payload::Summary(summary) => Some(summary_json(summary)),
        Payload::Snapshot(columns) => Some(json!({
            "columns": columns
                .iter()
                .map(|(name, values)| json!({
                    "name": name,
                    "values": values.iter().collect::<Vec<_>>(),
                }))
                .collect::<Vec<_>>(),
        })),
        Payload::Pair(left, right) => Some(json!({
            "steps": [step_json(left), step_json(right)],
        })),
        Payload::Repeated(steps) => Some(json!({
            "steps": steps.iter().map(step_json).collect::<Vec<_>>(),
        })),
        Payload::Timed { iterations, last } => Some(json!({
            "iterations": iterations,
            "last": step_json(last),
        })),
        Payload::Chaos(report) => Some(chaos_json(report)),
        Payload::Terminated => Some(json!({ "terminated": true })),
    }
}

fn summary_json(summary: &TableSummary) -> serde_json::Value {
    json!({
        "source": summary.source,
        "rows": summary.rows,
        "columns": summary
            .columns
            .iter()
            .map(|(name, kind)| json!({ "name": name, "type": kind.to_string() }))
            .collect::<Vec<_>>(),
    })
}

fn step_json(outcome: &Outcome) -> serde_json::Value {
    serde_json::to_value(Report::of(outcome)).unwrap_or(serde_json::Value::Null)
}

fn chaos_json(report: &ChaosReport) -> serde_json::Value {
    json!({
        "requested": report.requested,
        "declined": report.declined,
        "applied": report.applied(),
        "skipped": report.skipped(),
        "failed": report.failed(),
        "executed": report.executed(),
        "rounds": report.rounds.iter().map(round_line).collect::<Vec<_>>(),
    })
}

fn error_json(err: &Error) -> serde_json::Value {
    let context = err.context.as_ref();
    json!({
        "kind": err.kind.name(),
        "category": err.category().to_string(),
        "identifier": err.identifier(),
        "statement": context.and_then(|c| c.statement.as_deref()),
        "position": context.and_then(|c| c.position),
        "stack": context.map(|c| c.stack.clone()).unwrap_or_default(),
    })
}
