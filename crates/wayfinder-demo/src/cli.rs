#![forbid(unsafe_code)]

//! Command-line argument parsing for the demo harness.
//!
//! Parses args manually to keep the binary lean. Supports environment
//! variable overrides via the `WAYFINDER_DEMO_*` prefix.

use std::env;
use std::process;

use wayfinder_core::Size;

use crate::scenario::Scenario;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
Wayfinder Demo: scripted onboarding tour against a simulated host

USAGE:
    wayfinder-demo [OPTIONS]

OPTIONS:
    --scenario=NAME      Script to run (default: walkthrough)
    --viewport=WxH       Viewport size in logical pixels (default: 375x812)
    --tick-ms=N          Simulated clock step in ms (default: 16)
    --max-ticks=N        Give up after N ticks (default: 2000)
    --every-tick         Emit a frame every tick, not only on change
    --help, -h           Show this help message
    --version, -V        Show version

SCENARIOS:
    walkthrough   Next through every step until completion
    flaky         Late layout plus a vanished anchor; retries then degrades
    rotate        Walkthrough with a mid-tour viewport rotation
    skip          Two steps in, then a tap on the dimmed overlay

OUTPUT:
    One JSON object per line on stdout: {tick, elapsed_ms, snapshot}.
    Logs go to stderr.

ENVIRONMENT VARIABLES:
    WAYFINDER_DEMO_SCENARIO     Override --scenario
    WAYFINDER_DEMO_VIEWPORT     Override --viewport
    WAYFINDER_DEMO_TICK_MS      Override --tick-ms
    WAYFINDER_DEMO_MAX_TICKS    Override --max-ticks
    WAYFINDER_LOG               Log filter (default: wayfinder_runtime=info)
    WAYFINDER_LOG_FORMAT        Log format: 'json' or 'compact'
    WAYFINDER_POPOVER_WIDTH     Popover width used for placement (default: 300)
    WAYFINDER_POPOVER_HEIGHT    Popover height used for placement (default: 200)
    WAYFINDER_SPACING           Gap between spotlight and popover (default: 16)
    WAYFINDER_MIN_SPACE         Space needed before flipping sides (default: 240)
    WAYFINDER_CLAMP_SPOTLIGHT   Keep the spotlight inside the viewport (1/true)
    WAYFINDER_MEASURE_INITIAL_DELAY_MS   Delay before the first measurement
    WAYFINDER_MEASURE_RETRY_DELAY_MS     First retry delay
    WAYFINDER_MEASURE_MAX_DELAY_MS       Retry delay ceiling
    WAYFINDER_MEASURE_MAX_ATTEMPTS       Attempts before degrading
    WAYFINDER_MEASURE_ANSWER_TIMEOUT_MS  Wait for an answer before retrying
    WAYFINDER_SCROLL_TOP_PADDING         Auto-scroll top padding
    WAYFINDER_SCROLL_ANIMATED            Auto-scroll animation (1/true)
    WAYFINDER_SCROLL_ENABLED             Auto-scroll on/off (1/true)";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq)]
pub struct Opts {
    /// Which scripted scenario to run.
    pub scenario: Scenario,
    /// Initial viewport.
    pub viewport: Size,
    /// Simulated clock step in milliseconds.
    pub tick_ms: u64,
    /// Upper bound on ticks before giving up.
    pub max_ticks: u64,
    /// Emit a frame on every tick.
    pub every_tick: bool,
}

#[derive(Debug)]
enum ParseError {
    Help,
    Version,
    InvalidValue { flag: &'static str, value: String },
    UnknownArg(String),
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            scenario: Scenario::Walkthrough,
            viewport: Size::new(375.0, 812.0),
            tick_ms: 16,
            max_ticks: 2000,
            every_tick: false,
        }
    }
}

impl Opts {
    /// Parse command-line arguments and environment variables.
    ///
    /// Environment variables take precedence over defaults but are overridden
    /// by explicit command-line flags.
    pub fn parse() -> Self {
        match Self::parse_from_env_and_args(env::args().skip(1), |key| env::var(key).ok()) {
            Ok(opts) => opts,
            Err(ParseError::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Err(ParseError::Version) => {
                println!("wayfinder-demo {VERSION}");
                process::exit(0);
            }
            Err(ParseError::InvalidValue { flag, value }) => {
                eprintln!("Invalid {flag} value: {value}");
                process::exit(1);
            }
            Err(ParseError::UnknownArg(arg)) => {
                eprintln!("Unknown argument: {arg}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    fn parse_from_env_and_args<I, S, F>(args: I, get_env: F) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::default();

        // Environment first; flags override below.
        if let Some(val) = get_env("WAYFINDER_DEMO_SCENARIO")
            && let Some(scenario) = Scenario::parse(&val)
        {
            opts.scenario = scenario;
        }
        if let Some(val) = get_env("WAYFINDER_DEMO_VIEWPORT")
            && let Some(size) = parse_size(&val)
        {
            opts.viewport = size;
        }
        if let Some(val) = get_env("WAYFINDER_DEMO_TICK_MS")
            && let Ok(n) = val.parse::<u64>()
            && n > 0
        {
            opts.tick_ms = n;
        }
        if let Some(val) = get_env("WAYFINDER_DEMO_MAX_TICKS")
            && let Ok(n) = val.parse()
        {
            opts.max_ticks = n;
        }

        for arg in args {
            let arg = arg.as_ref();
            match arg {
                "--help" | "-h" => return Err(ParseError::Help),
                "--version" | "-V" => return Err(ParseError::Version),
                "--every-tick" => opts.every_tick = true,
                other => {
                    if let Some(val) = other.strip_prefix("--scenario=") {
                        match Scenario::parse(val) {
                            Some(scenario) => opts.scenario = scenario,
                            None => {
                                return Err(ParseError::InvalidValue {
                                    flag: "--scenario",
                                    value: val.to_string(),
                                });
                            }
                        }
                    } else if let Some(val) = other.strip_prefix("--viewport=") {
                        match parse_size(val) {
                            Some(size) => opts.viewport = size,
                            None => {
                                return Err(ParseError::InvalidValue {
                                    flag: "--viewport",
                                    value: val.to_string(),
                                });
                            }
                        }
                    } else if let Some(val) = other.strip_prefix("--tick-ms=") {
                        match val.parse::<u64>() {
                            Ok(n) if n > 0 => opts.tick_ms = n,
                            _ => {
                                return Err(ParseError::InvalidValue {
                                    flag: "--tick-ms",
                                    value: val.to_string(),
                                });
                            }
                        }
                    } else if let Some(val) = other.strip_prefix("--max-ticks=") {
                        match val.parse() {
                            Ok(n) => opts.max_ticks = n,
                            Err(_) => {
                                return Err(ParseError::InvalidValue {
                                    flag: "--max-ticks",
                                    value: val.to_string(),
                                });
                            }
                        }
                    } else {
                        return Err(ParseError::UnknownArg(other.to_string()));
                    }
                }
            }
        }

        Ok(opts)
    }
}

fn parse_size(raw: &str) -> Option<Size> {
    let trimmed = raw.trim();
    let mut parts = trimmed.split(['x', 'X']);
    let width: u32 = parts.next()?.parse().ok()?;
    let height: u32 = parts.next()?.parse().ok()?;
    if parts.next().is_some() || width == 0 || height == 0 {
        return None;
    }
    Some(Size::new(width as f32, height as f32))
}
