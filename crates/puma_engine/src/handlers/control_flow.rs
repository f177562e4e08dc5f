//! Composite commands: timed repetition, paired composition, fixed-count
//! repetition, and the read-only capture.
//!
//! Composites never touch the table themselves. The evaluator hands them a
//! `step` callback that runs one transform action and installs its result,
//! so every inner step sees the table the previous one left behind. A
//! failing step is recorded and the composite carries on.

use std::thread;
use std::time::{Duration, Instant};

use puma_foundation::{Result, Table};
use puma_language::{Action, Keyword};
use tracing::debug;

use crate::config::EngineConfig;
use crate::outcome::{Outcome, Payload, Success};

/// Runs one action against the live table and installs the result.
pub type Step<'a> = dyn FnMut(&Action) -> Outcome + 'a;

/// Re-runs `action` until the time budget is spent, pausing between runs.
///
/// At least one iteration always runs. Returns the iteration count and the
/// final iteration's result.
pub fn timed_repeat(action: &Action, config: &EngineConfig, step: &mut Step<'_>) -> Success {
    let started = Instant::now();
    let deadline = deadline_after(started, config.timed_budget);
    let mut iterations = 0;
    loop {
        let last = step(action).map_err(|e| e.in_frame(frame(Keyword::Timed, iterations + 1)));
        iterations += 1;

        let now = Instant::now();
        if now >= deadline {
            debug!(iterations, "timed repetition finished");
            return Success::with_payload(
                format!(
                    "{} ran {iterations} times in {:.1}s",
                    action.keyword(),
                    started.elapsed().as_secs_f64()
                ),
                Payload::Timed {
                    iterations,
                    last: Box::new(last),
                },
            );
        }
        thread::sleep(config.timed_pause.min(deadline.saturating_duration_since(now)));
    }
}

/// Runs two actions, left then right, whatever the first one returns.
pub fn pair(first: &Action, second: &Action, step: &mut Step<'_>) -> Success {
    let left = step(first).map_err(|e| e.in_frame(frame(Keyword::Pair, 1)));
    let right = step(second).map_err(|e| e.in_frame(frame(Keyword::Pair, 2)));
    let ok = usize::from(left.is_ok()) + usize::from(right.is_ok());
    Success::with_payload(
        format!("{first} then {second}: {ok} of 2 succeeded"),
        Payload::Pair(Box::new(left), Box::new(right)),
    )
}

/// Runs one action a fixed number of times in sequence.
pub fn fixed_repeat(action: &Action, config: &EngineConfig, step: &mut Step<'_>) -> Success {
    let results: Vec<Outcome> = (1..=config.fixed_repeat)
        .map(|i| step(action).map_err(|e| e.in_frame(frame(Keyword::Loop3, i))))
        .collect();
    let ok = results.iter().filter(|r| r.is_ok()).count();
    Success::with_payload(
        format!("{action} ran {} times: {ok} succeeded", results.len()),
        Payload::Repeated(results),
    )
}

/// Copies three columns out of the table, in operand order.
///
/// # Errors
///
/// `ColumnNotFound` naming the first missing column, left to right.
pub fn capture(columns: &[String; 3], table: &Table) -> Result<Success> {
    let snapshot = columns
        .iter()
        .map(|name| {
            table
                .require_column(name)
                .map(|c| (name.clone(), c.values().clone()))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Success::with_payload(
        format!("captured {}", columns.join(", ")),
        Payload::Snapshot(snapshot),
    ))
}

/// `start + budget`, saturating at roughly a century out when the sum is
/// not representable.
fn deadline_after(start: Instant, budget: Duration) -> Instant {
    const FAR: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);
    start
        .checked_add(budget)
        .or_else(|| start.checked_add(FAR))
        .unwrap_or(start)
}

fn frame(keyword: Keyword, iteration: usize) -> String {
    format!("{keyword} step {iteration}")
}
