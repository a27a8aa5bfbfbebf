#![forbid(unsafe_code)]

//! Deterministic tick loop: script cues, tour timers, host answers, frames.
//!
//! Each tick advances a simulated clock by a fixed step, applies any cues
//! that are due, lets the tour issue measurement requests, and has the host
//! answer them. Whenever the tour revision moves, the snapshot is written as
//! one JSON line.

use std::cell::Cell;
use std::fmt;
use std::io::{self, Write};
use std::rc::Rc;

use serde::Serialize;
use tracing::{debug, info, info_span, warn};
use wayfinder::{MeasureStatus, RuntimeSettings, Tour, TourError, TourSnapshot};
use web_time::{Duration, Instant};

use crate::cli::Opts;
use crate::host::SimHost;
use crate::scenario::{CueAction, onboarding_tour};

/// How the run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Completed,
    Skipped,
    /// Still active when the tick budget ran out.
    #[default]
    Unfinished,
}

/// Totals for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub outcome: Outcome,
    pub ticks: u64,
    pub frames: u64,
    /// Step indices that fell back to a centered popover.
    pub degraded_steps: Vec<usize>,
}

/// One JSONL record.
#[derive(Debug, Serialize)]
struct Frame<'a> {
    tick: u64,
    elapsed_ms: u64,
    snapshot: &'a TourSnapshot,
}

/// Errors that abort a run.
#[derive(Debug)]
pub enum DemoError {
    Tour(TourError),
    Io(io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for DemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tour(e) => write!(f, "tour error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Json(e) => write!(f, "encode error: {e}"),
        }
    }
}

impl std::error::Error for DemoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Tour(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
        }
    }
}

impl From<TourError> for DemoError {
    fn from(e: TourError) -> Self {
        Self::Tour(e)
    }
}

impl From<io::Error> for DemoError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for DemoError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Run the scenario selected by `opts`, writing frames to `out`.
pub fn run<W: Write>(
    opts: &Opts,
    settings: RuntimeSettings,
    out: &mut W,
) -> Result<RunSummary, DemoError> {
    let _span = info_span!("demo.run", scenario = %opts.scenario).entered();

    let host = SimHost::new(opts.viewport, opts.scenario.unsettled_requests());
    let outcome = Rc::new(Cell::new(Outcome::Unfinished));
    let (completed, skipped) = (outcome.clone(), outcome.clone());
    let config = onboarding_tour(&host)
        .on_start(|tour| info!(steps = tour.total_steps(), "tour started"))
        .on_complete(move |_| completed.set(Outcome::Completed))
        .on_skip(move |tour| {
            info!(step = tour.current_step_index(), "tour skipped");
            skipped.set(Outcome::Skipped);
        });
    let tour = Tour::with_settings(config, settings, opts.viewport)?;

    let mut cues = opts.scenario.script(opts.viewport).into_iter().peekable();
    let epoch = Instant::now();
    let mut summary = RunSummary::default();
    let mut last_revision = None;
    let mut started = false;

    for tick in 0..=opts.max_ticks {
        let elapsed_ms = tick * opts.tick_ms;
        while let Some(cue) = cues.next_if(|cue| cue.at_ms <= elapsed_ms) {
            debug!(at_ms = cue.at_ms, action = ?cue.action, "cue");
            started |= apply(&tour, &host, cue.action);
        }

        tour.tick(epoch + Duration::from_millis(elapsed_ms));
        host.flush(&tour);
        summary.ticks = tick + 1;

        let revision = tour.revision();
        if opts.every_tick || last_revision != Some(revision) {
            last_revision = Some(revision);
            let snapshot = tour.snapshot();
            if snapshot.measure_status == MeasureStatus::Degraded
                && !summary.degraded_steps.contains(&snapshot.current_step_index)
            {
                summary.degraded_steps.push(snapshot.current_step_index);
            }
            serde_json::to_writer(
                &mut *out,
                &Frame {
                    tick,
                    elapsed_ms,
                    snapshot: &snapshot,
                },
            )?;
            out.write_all(b"\n")?;
            summary.frames += 1;
        }

        if started && !tour.is_active() {
            break;
        }
    }
    out.flush()?;

    summary.outcome = outcome.get();
    if summary.outcome == Outcome::Unfinished {
        warn!(ticks = summary.ticks, "tick budget ran out with the tour still active");
    }
    info!(
        outcome = ?summary.outcome,
        ticks = summary.ticks,
        frames = summary.frames,
        degraded = summary.degraded_steps.len(),
        "run finished"
    );
    Ok(summary)
}

/// Apply one cue. Returns whether it started the tour.
fn apply(tour: &Tour, host: &SimHost, action: CueAction) -> bool {
    match action {
        CueAction::Start => tour.start(),
        CueAction::Press(action) => {
            tour.handle_action(action);
            false
        }
        CueAction::Resize(viewport) => {
            host.relayout(viewport);
            tour.set_viewport(viewport);
            false
        }
        CueAction::Remove(name) => {
            host.remove(name);
            false
        }
    }
}
