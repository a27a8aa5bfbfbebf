#![forbid(unsafe_code)]

//! Asynchronous anchor measurement with bounded retry.
//!
//! The host's layout pass is asynchronous: asking for an element's rectangle
//! right after a step change may return nothing (zero size, not laid out
//! yet). The [`MeasurementTracker`] owns the request lifecycle for the
//! current step.
//!
//! # Invariants
//!
//! 1. Every `begin` and `cancel` bumps the generation. A ticket from an older
//!    generation, or for a different step, is stale and never applied.
//! 2. At most one request is in flight at a time.
//! 3. The attempt count never exceeds `max_attempts`.
//! 4. Retry delays grow geometrically by `backoff` and never exceed
//!    `max_delay`.
//! 5. Time is supplied by the caller; the tracker never reads a clock.
//! 6. An in-flight request carries a deadline. An answer that has not
//!    arrived by then counts as a failed attempt, so a host that drops a
//!    request cannot leave the step measuring forever.
//!
//! # Lifecycle
//!
//! ```text
//!   begin ──► Waiting(initial) ──poll──► Scheduled(due) ──poll≥due──► InFlight(deadline)
//!                  ▲                                                     │
//!                  │ invalid rect / failure / overdue (attempt < max)    │
//!                  └─────────────────────────────────────────────────────┤
//!                                                                        │
//!                     valid rect ──► Resolved(rect)                      │
//!                     invalid rect / failure / overdue (attempt = max) ──► Exhausted
//! ```

use std::env;

use serde::{Deserialize, Serialize};
use wayfinder_core::env::{apply, parse_u32, parse_u64};
use wayfinder_core::{ConfigError, Rect};
use web_time::{Duration, Instant};

const ENV_INITIAL_DELAY_MS: &str = "WAYFINDER_MEASURE_INITIAL_DELAY_MS";
const ENV_RETRY_DELAY_MS: &str = "WAYFINDER_MEASURE_RETRY_DELAY_MS";
const ENV_MAX_DELAY_MS: &str = "WAYFINDER_MEASURE_MAX_DELAY_MS";
const ENV_MAX_ATTEMPTS: &str = "WAYFINDER_MEASURE_MAX_ATTEMPTS";
const ENV_ANSWER_TIMEOUT_MS: &str = "WAYFINDER_MEASURE_ANSWER_TIMEOUT_MS";

/// Timing policy for measurement requests.
///
/// # Environment Variables
/// - `WAYFINDER_MEASURE_INITIAL_DELAY_MS` (u64)
/// - `WAYFINDER_MEASURE_RETRY_DELAY_MS` (u64)
/// - `WAYFINDER_MEASURE_MAX_DELAY_MS` (u64)
/// - `WAYFINDER_MEASURE_MAX_ATTEMPTS` (u32 >= 1)
/// - `WAYFINDER_MEASURE_ANSWER_TIMEOUT_MS` (u64 >= 1)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurePolicy {
    /// Delay before the first attempt, giving the host's layout time to settle.
    pub initial_delay: Duration,
    /// Delay before the first retry.
    pub retry_delay: Duration,
    /// Growth factor applied to the retry delay after each failure.
    pub backoff: f32,
    /// Ceiling for the retry delay.
    pub max_delay: Duration,
    /// Total attempts before giving up (including the first).
    pub max_attempts: u32,
    /// How long an issued request may go unanswered before it counts as failed.
    pub answer_timeout: Duration,
}

impl Default for MeasurePolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(150),
            retry_delay: Duration::from_millis(100),
            backoff: 1.5,
            max_delay: Duration::from_secs(1),
            max_attempts: 10,
            answer_timeout: Duration::from_secs(1),
        }
    }
}

impl MeasurePolicy {
    #[must_use]
    pub fn initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    #[must_use]
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    #[must_use]
    pub fn backoff(mut self, factor: f32) -> Self {
        self.backoff = factor;
        self
    }

    #[must_use]
    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    #[must_use]
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    #[must_use]
    pub fn answer_timeout(mut self, timeout: Duration) -> Self {
        self.answer_timeout = timeout;
        self
    }

    /// Parse policy from environment variables.
    #[must_use]
    pub fn from_env() -> (MeasurePolicy, Vec<ConfigError>) {
        Self::from_env_with(|key| env::var(key).ok())
    }

    /// Parse policy through a custom lookup, returning diagnostics.
    #[must_use]
    pub fn from_env_with<F>(mut get: F) -> (MeasurePolicy, Vec<ConfigError>)
    where
        F: FnMut(&str) -> Option<String>,
    {
        let defaults = MeasurePolicy::default();
        let mut errors = Vec::new();

        let mut initial_ms = millis(defaults.initial_delay);
        let mut retry_ms = millis(defaults.retry_delay);
        let mut max_ms = millis(defaults.max_delay);
        let mut max_attempts = defaults.max_attempts;
        let mut timeout_ms = millis(defaults.answer_timeout);

        apply(
            &mut get,
            ENV_INITIAL_DELAY_MS,
            "measure_initial_delay_ms",
            "expected milliseconds",
            parse_u64,
            &mut initial_ms,
            &mut errors,
        );
        apply(
            &mut get,
            ENV_RETRY_DELAY_MS,
            "measure_retry_delay_ms",
            "expected milliseconds",
            parse_u64,
            &mut retry_ms,
            &mut errors,
        );
        apply(
            &mut get,
            ENV_MAX_DELAY_MS,
            "measure_max_delay_ms",
            "expected milliseconds",
            parse_u64,
            &mut max_ms,
            &mut errors,
        );
        apply(
            &mut get,
            ENV_MAX_ATTEMPTS,
            "measure_max_attempts",
            "expected positive integer",
            parse_u32,
            &mut max_attempts,
            &mut errors,
        );
        apply(
            &mut get,
            ENV_ANSWER_TIMEOUT_MS,
            "measure_answer_timeout_ms",
            "expected milliseconds",
            parse_u64,
            &mut timeout_ms,
            &mut errors,
        );

        let mut policy = MeasurePolicy {
            initial_delay: Duration::from_millis(initial_ms),
            retry_delay: Duration::from_millis(retry_ms),
            max_delay: Duration::from_millis(max_ms),
            max_attempts,
            answer_timeout: Duration::from_millis(timeout_ms),
            ..defaults
        };

        if let Err(violations) = policy.validate() {
            for violation in &violations {
                match violation.field {
                    "measure_max_attempts" => policy.max_attempts = defaults.max_attempts,
                    "measure_max_delay_ms" => policy.max_delay = defaults.max_delay,
                    "measure_backoff" => policy.backoff = defaults.backoff,
                    "measure_answer_timeout_ms" => {
                        policy.answer_timeout = defaults.answer_timeout;
                    }
                    _ => {}
                }
            }
            errors.extend(violations);
        }

        (policy, errors)
    }

    /// Validate policy constraints and return all violations.
    pub fn validate(&self) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();
        if self.max_attempts == 0 {
            errors.push(ConfigError::new(
                "measure_max_attempts",
                "0",
                "must be >= 1",
            ));
        }
        if self.max_delay < self.retry_delay {
            errors.push(ConfigError::new(
                "measure_max_delay_ms",
                millis(self.max_delay).to_string(),
                "must be >= retry delay",
            ));
        }
        if !self.backoff.is_finite() || self.backoff < 1.0 {
            errors.push(ConfigError::new(
                "measure_backoff",
                self.backoff.to_string(),
                "must be >= 1",
            ));
        }
        if self.answer_timeout.is_zero() {
            errors.push(ConfigError::new(
                "measure_answer_timeout_ms",
                "0",
                "must be >= 1",
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Delay before retry number `retry` (1-based), backoff applied and capped.
    #[must_use]
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        let mut delay = self.retry_delay;
        for _ in 1..retry {
            delay = scale(delay, self.backoff);
            if delay >= self.max_delay {
                return self.max_delay;
            }
        }
        delay.min(self.max_delay)
    }
}

/// Multiply in whole nanoseconds so `100ms * 1.5` is exactly `150ms`.
fn scale(d: Duration, factor: f32) -> Duration {
    let nanos = d.as_nanos() as f64 * f64::from(factor);
    Duration::from_nanos(nanos.round() as u64)
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Identity of a single measurement request.
///
/// Handed to the anchor with the request and returned by the host with the
/// answer, so late answers for a step that is no longer current can be told
/// apart from fresh ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeasureTicket {
    pub step_index: usize,
    pub generation: u64,
    /// 1-based attempt number within the generation.
    pub attempt: u32,
}

/// Where the current step's measurement stands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeasurePhase {
    /// Nothing to measure (inactive tour, center step, no anchor).
    Idle,
    /// Waiting for the next `poll` to schedule an attempt after the delay.
    Waiting(Duration),
    /// Attempt due at the given instant.
    Scheduled(Instant),
    /// A request has been issued and no answer has arrived. The request
    /// counts as failed once the deadline passes.
    InFlight(Instant),
    /// A valid rectangle arrived.
    Resolved(Rect),
    /// Every attempt failed; the step renders degraded.
    Exhausted,
}

/// Result of feeding an answer into the tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeasureOutcome {
    /// Ticket did not match the current request; ignored.
    Stale,
    /// Rectangle accepted.
    Accepted(Rect),
    /// Answer unusable; another attempt will be scheduled after `delay`.
    Retry { delay: Duration },
    /// Answer unusable and no attempts remain.
    Exhausted,
}

/// Measurement lifecycle for the current step.
#[derive(Debug, Clone)]
pub struct MeasurementTracker {
    policy: MeasurePolicy,
    generation: u64,
    step_index: usize,
    attempt: u32,
    phase: MeasurePhase,
}

impl MeasurementTracker {
    #[must_use]
    pub fn new(policy: MeasurePolicy) -> Self {
        Self {
            policy,
            generation: 0,
            step_index: 0,
            attempt: 0,
            phase: MeasurePhase::Idle,
        }
    }

    #[must_use]
    pub fn policy(&self) -> &MeasurePolicy {
        &self.policy
    }

    #[must_use]
    pub fn phase(&self) -> MeasurePhase {
        self.phase
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempt
    }

    /// Start measuring `step_index`, invalidating every outstanding ticket.
    pub fn begin(&mut self, step_index: usize) {
        self.generation = self.generation.wrapping_add(1);
        self.step_index = step_index;
        self.attempt = 0;
        self.phase = MeasurePhase::Waiting(self.policy.initial_delay);
    }

    /// Drop any pending or in-flight request.
    pub fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.attempt = 0;
        self.phase = MeasurePhase::Idle;
    }

    /// Measure the same step again from scratch (viewport changed, anchor
    /// re-bound). No-op while idle.
    pub fn restart(&mut self) {
        if self.phase != MeasurePhase::Idle {
            self.begin(self.step_index);
        }
    }

    /// Advance timers. Returns a ticket when a request should be issued now.
    pub fn poll(&mut self, now: Instant) -> Option<MeasureTicket> {
        if let MeasurePhase::Waiting(delay) = self.phase {
            self.phase = MeasurePhase::Scheduled(now + delay);
        }
        match self.phase {
            MeasurePhase::Scheduled(due) if now >= due => {
                self.attempt += 1;
                self.phase = MeasurePhase::InFlight(now + self.policy.answer_timeout);
                Some(self.ticket())
            }
            _ => None,
        }
    }

    /// Whether `ticket` answers the request currently in flight.
    #[must_use]
    pub fn is_current(&self, ticket: MeasureTicket) -> bool {
        matches!(self.phase, MeasurePhase::InFlight(_))
            && ticket.generation == self.generation
            && ticket.step_index == self.step_index
            && ticket.attempt == self.attempt
    }

    /// Feed a measured rectangle.
    pub fn complete(&mut self, ticket: MeasureTicket, rect: Rect) -> MeasureOutcome {
        if !self.is_current(ticket) {
            return MeasureOutcome::Stale;
        }
        if rect.is_measurable() {
            self.phase = MeasurePhase::Resolved(rect);
            return MeasureOutcome::Accepted(rect);
        }
        self.retry_or_exhaust()
    }

    /// Report that the request could not be answered (element gone, host
    /// error). Counts as a failed attempt.
    pub fn fail(&mut self, ticket: MeasureTicket) -> MeasureOutcome {
        if !self.is_current(ticket) {
            return MeasureOutcome::Stale;
        }
        self.retry_or_exhaust()
    }

    /// Give up on the in-flight request once its deadline has passed.
    ///
    /// Returns the abandoned ticket with the outcome of counting it as a
    /// failed attempt. A late answer for that ticket is stale.
    pub fn expire(&mut self, now: Instant) -> Option<(MeasureTicket, MeasureOutcome)> {
        match self.phase {
            MeasurePhase::InFlight(deadline) if now >= deadline => {
                let ticket = self.ticket();
                Some((ticket, self.retry_or_exhaust()))
            }
            _ => None,
        }
    }

    /// The accepted rectangle, if any.
    #[must_use]
    pub fn rect(&self) -> Option<Rect> {
        match self.phase {
            MeasurePhase::Resolved(rect) => Some(rect),
            _ => None,
        }
    }

    fn ticket(&self) -> MeasureTicket {
        MeasureTicket {
            step_index: self.step_index,
            generation: self.generation,
            attempt: self.attempt,
        }
    }

    fn retry_or_exhaust(&mut self) -> MeasureOutcome {
        if self.attempt >= self.policy.max_attempts {
            self.phase = MeasurePhase::Exhausted;
            return MeasureOutcome::Exhausted;
        }
        let delay = self.policy.delay_for_retry(self.attempt);
        self.phase = MeasurePhase::Waiting(delay);
        MeasureOutcome::Retry { delay }
    }
}

impl Default for MeasurementTracker {
    fn default() -> Self {
        Self::new(MeasurePolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD: Rect = Rect::new(10.0, 20.0, 100.0, 40.0);
    const ZERO: Rect = Rect::new(10.0, 20.0, 0.0, 0.0);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    /// Drive the tracker until a ticket is issued, returning it and the
    /// instant it was issued at.
    fn issue(tracker: &mut MeasurementTracker, mut now: Instant) -> (MeasureTicket, Instant) {
        for _ in 0..64 {
            if let Some(ticket) = tracker.poll(now) {
                return (ticket, now);
            }
            now += ms(10);
        }
        panic!("tracker never issued a ticket: {:?}", tracker.phase());
    }

    // ── Policy ──────────────────────────────────────────────────────────

    #[test]
    fn default_policy_values() {
        let p = MeasurePolicy::default();
        assert_eq!(p.initial_delay, ms(150));
        assert_eq!(p.retry_delay, ms(100));
        assert_eq!(p.max_delay, ms(1000));
        assert_eq!(p.max_attempts, 10);
        assert_eq!(p.answer_timeout, ms(1000));
        assert!(p.validate().is_ok());
    }

    #[test]
    fn backoff_grows_and_caps() {
        let p = MeasurePolicy::default();
        assert_eq!(p.delay_for_retry(1), ms(100));
        assert_eq!(p.delay_for_retry(2), ms(150));
        assert_eq!(p.delay_for_retry(3), ms(225));
        assert_eq!(p.delay_for_retry(50), ms(1000));
    }

    #[test]
    fn env_parsing_with_diagnostics() {
        let (p, errors) = MeasurePolicy::from_env_with(|key| match key {
            ENV_INITIAL_DELAY_MS => Some("0".into()),
            ENV_RETRY_DELAY_MS => Some("fast".into()),
            ENV_MAX_ATTEMPTS => Some("0".into()),
            _ => None,
        });
        assert_eq!(p.initial_delay, ms(0));
        assert_eq!(p.retry_delay, ms(100));
        assert_eq!(p.max_attempts, 10);
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec!["measure_retry_delay_ms", "measure_max_attempts"]
        );
    }

    #[test]
    fn env_rejects_max_below_retry() {
        let (p, errors) = MeasurePolicy::from_env_with(|key| match key {
            ENV_MAX_DELAY_MS => Some("50".into()),
            _ => None,
        });
        assert_eq!(p.max_delay, ms(1000));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "measure_max_delay_ms");
    }

    #[test]
    fn env_answer_timeout() {
        let (p, errors) = MeasurePolicy::from_env_with(|key| match key {
            ENV_ANSWER_TIMEOUT_MS => Some("250".into()),
            _ => None,
        });
        assert!(errors.is_empty());
        assert_eq!(p.answer_timeout, ms(250));

        let (p, errors) = MeasurePolicy::from_env_with(|key| match key {
            ENV_ANSWER_TIMEOUT_MS => Some("0".into()),
            _ => None,
        });
        assert_eq!(p.answer_timeout, ms(1000));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "measure_answer_timeout_ms");
    }

    // ── Tracker lifecycle ───────────────────────────────────────────────

    #[test]
    fn idle_tracker_never_issues() {
        let mut t = MeasurementTracker::default();
        assert_eq!(t.poll(Instant::now()), None);
        assert_eq!(t.phase(), MeasurePhase::Idle);
    }

    #[test]
    fn first_attempt_waits_initial_delay() {
        let mut t = MeasurementTracker::default();
        let start = Instant::now();
        t.begin(2);
        assert_eq!(t.poll(start), None);
        assert_eq!(t.poll(start + ms(149)), None);
        let ticket = t.poll(start + ms(150)).unwrap();
        assert_eq!(ticket.step_index, 2);
        assert_eq!(ticket.attempt, 1);
        assert_eq!(t.phase(), MeasurePhase::InFlight(start + ms(1150)));
    }

    #[test]
    fn zero_delay_issues_on_first_poll() {
        let mut t = MeasurementTracker::new(MeasurePolicy::default().initial_delay(Duration::ZERO));
        t.begin(0);
        assert!(t.poll(Instant::now()).is_some());
    }

    #[test]
    fn valid_rect_resolves() {
        let mut t = MeasurementTracker::default();
        t.begin(0);
        let (ticket, _) = issue(&mut t, Instant::now());
        assert_eq!(t.complete(ticket, GOOD), MeasureOutcome::Accepted(GOOD));
        assert_eq!(t.rect(), Some(GOOD));
    }

    #[test]
    fn zero_size_retries_then_resolves() {
        let mut t = MeasurementTracker::default();
        t.begin(0);
        let (first, at) = issue(&mut t, Instant::now());
        assert_eq!(
            t.complete(first, ZERO),
            MeasureOutcome::Retry { delay: ms(100) }
        );
        assert_eq!(t.rect(), None);

        let (second, _) = issue(&mut t, at);
        assert_eq!(second.attempt, 2);
        assert_eq!(second.generation, first.generation);
        assert_eq!(t.complete(second, GOOD), MeasureOutcome::Accepted(GOOD));
    }

    #[test]
    fn attempts_bounded_then_exhausted() {
        let policy = MeasurePolicy::default().max_attempts(3);
        let mut t = MeasurementTracker::new(policy);
        t.begin(0);
        let mut now = Instant::now();
        for attempt in 1..=3 {
            let (ticket, at) = issue(&mut t, now);
            now = at;
            assert_eq!(ticket.attempt, attempt);
            let outcome = t.fail(ticket);
            if attempt < 3 {
                assert!(matches!(outcome, MeasureOutcome::Retry { .. }));
            } else {
                assert_eq!(outcome, MeasureOutcome::Exhausted);
            }
        }
        assert_eq!(t.phase(), MeasurePhase::Exhausted);
        assert_eq!(t.poll(now + ms(10_000)), None);
        assert_eq!(t.attempts(), 3);
    }

    // ── Answer deadline ─────────────────────────────────────────────────

    #[test]
    fn unanswered_request_expires_as_failed_attempt() {
        let policy = MeasurePolicy::default().answer_timeout(ms(500));
        let mut t = MeasurementTracker::new(policy);
        t.begin(0);
        let (ticket, at) = issue(&mut t, Instant::now());
        assert_eq!(t.expire(at + ms(499)), None);
        assert_eq!(
            t.expire(at + ms(500)),
            Some((ticket, MeasureOutcome::Retry { delay: ms(100) }))
        );
        assert_eq!(t.phase(), MeasurePhase::Waiting(ms(100)));
        // Only one expiry per request.
        assert_eq!(t.expire(at + ms(10_000)), None);
        // The abandoned request's answer is no longer applied.
        assert_eq!(t.complete(ticket, GOOD), MeasureOutcome::Stale);

        let (next, _) = issue(&mut t, at + ms(500));
        assert_eq!(next.attempt, 2);
        assert_eq!(t.complete(next, GOOD), MeasureOutcome::Accepted(GOOD));
    }

    #[test]
    fn silent_host_exhausts_attempts() {
        let policy = MeasurePolicy::default().max_attempts(3);
        let mut t = MeasurementTracker::new(policy);
        t.begin(0);
        let mut now = Instant::now();
        let mut issued = 0;
        for _ in 0..1_000 {
            if t.poll(now).is_some() {
                issued += 1;
            }
            let _ = t.expire(now);
            now += ms(16);
        }
        assert_eq!(issued, 3);
        assert_eq!(t.phase(), MeasurePhase::Exhausted);
    }

    #[test]
    fn resolved_step_never_expires() {
        let mut t = MeasurementTracker::default();
        t.begin(0);
        let (ticket, at) = issue(&mut t, Instant::now());
        let _ = t.complete(ticket, GOOD);
        assert_eq!(t.expire(at + ms(60_000)), None);
        assert_eq!(t.rect(), Some(GOOD));
    }

    // ── Staleness ───────────────────────────────────────────────────────

    #[test]
    fn begin_invalidates_old_tickets() {
        let mut t = MeasurementTracker::default();
        t.begin(0);
        let (old, at) = issue(&mut t, Instant::now());
        t.begin(1);
        assert_eq!(t.complete(old, GOOD), MeasureOutcome::Stale);
        assert_eq!(t.rect(), None);

        let (fresh, _) = issue(&mut t, at);
        assert_eq!(fresh.step_index, 1);
        assert!(fresh.generation > old.generation);
    }

    #[test]
    fn same_step_new_generation_is_stale() {
        let mut t = MeasurementTracker::default();
        t.begin(0);
        let (old, _) = issue(&mut t, Instant::now());
        t.restart();
        assert_eq!(t.complete(old, GOOD), MeasureOutcome::Stale);
    }

    #[test]
    fn duplicate_answer_is_stale() {
        let mut t = MeasurementTracker::default();
        t.begin(0);
        let (ticket, _) = issue(&mut t, Instant::now());
        assert_eq!(t.complete(ticket, GOOD), MeasureOutcome::Accepted(GOOD));
        assert_eq!(t.complete(ticket, ZERO), MeasureOutcome::Stale);
        assert_eq!(t.rect(), Some(GOOD));
    }

    #[test]
    fn cancel_drops_pending_retry() {
        let mut t = MeasurementTracker::default();
        t.begin(0);
        let (ticket, at) = issue(&mut t, Instant::now());
        let _ = t.fail(ticket);
        t.cancel();
        assert_eq!(t.phase(), MeasurePhase::Idle);
        assert_eq!(t.poll(at + ms(10_000)), None);
    }

    #[test]
    fn restart_while_idle_is_noop() {
        let mut t = MeasurementTracker::default();
        let before = t.generation();
        t.restart();
        assert_eq!(t.generation(), before);
        assert_eq!(t.phase(), MeasurePhase::Idle);
    }
}
