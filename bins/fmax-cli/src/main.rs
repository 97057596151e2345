//! fmax — falling maximum of a sequence of integers.
//!
//! Reads integers from the command line (or whitespace-separated from stdin),
//! runs them through the falling-max operator, and prints one output per
//! line. After the last input the maximum keeps falling to zero unless
//! `--no-drain` is given.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use fmax_core::config::OperatorConfig;
use fmax_core::traits::Subscriber;
use fmax_core::types::Completion;
use fmax_operator::{FallingMax, FallingMaxSubscriber, FnSink, TracingObserver, publish};
use tracing::{debug, info};

/// CLI arguments.
#[derive(Debug, Parser)]
#[command(name = "fmax")]
#[command(about = "Falling maximum with step decay to zero", long_about = None)]
struct Args {
    /// Input values. Read from stdin when omitted.
    #[arg(allow_negative_numbers = true)]
    values: Vec<i64>,

    /// Decay step; overrides the config file and FMAX_DECAY_STEP.
    #[arg(long)]
    step: Option<i64>,

    /// JSON config file (e.g. `{"decay_step": 2}`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Stop after the last input instead of falling to zero.
    #[arg(long)]
    no_drain: bool,

    /// Print a JSON array instead of one value per line.
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level, args.log_format)?;

    let config = resolve_config(&args, |var| std::env::var(var).ok())?;
    info!(decay_step = config.decay_step, "fmax v{}", env!("CARGO_PKG_VERSION"));

    let inputs: Vec<Result<i64, String>> = if args.values.is_empty() {
        let raw = std::io::read_to_string(std::io::stdin()).context("failed to read stdin")?;
        parse_tokens(&raw)
    } else {
        args.values.iter().copied().map(Ok).collect()
    };

    let (outputs, failure) = run(inputs, &config, !args.no_drain)?;

    if args.json {
        println!("{}", serde_json::to_string(&outputs)?);
    } else {
        for v in &outputs {
            println!("{v}");
        }
    }

    if let Some(reason) = failure {
        bail!(reason);
    }
    Ok(())
}

/// Config file, then environment, then `--step`.
fn resolve_config<F>(args: &Args, env: F) -> Result<OperatorConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let base = match &args.config {
        Some(path) => OperatorConfig::from_json_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => OperatorConfig::default(),
    };
    let mut config = base.with_env_overrides(env)?;
    if let Some(step) = args.step {
        config.decay_step = step;
    }
    config.validate().context("invalid decay step")?;
    Ok(config)
}

fn parse_tokens(raw: &str) -> Vec<Result<i64, String>> {
    raw.split_whitespace()
        .map(|tok| {
            tok.parse::<i64>()
                .map_err(|e| format!("invalid input value {tok:?}: {e}"))
        })
        .collect()
}

/// Push `inputs` through the operator.
///
/// Returns every emitted value and, if an input failed to parse, the
/// forwarded failure.
fn run(
    inputs: Vec<Result<i64, String>>,
    config: &OperatorConfig,
    drain: bool,
) -> Result<(Vec<i64>, Option<String>)> {
    let op = FallingMax::<i64>::from_config(config)?;
    let mut outputs = Vec::with_capacity(inputs.len());
    let mut sink = FnSink::new(|v: i64| outputs.push(v));

    {
        let mut sub = FallingMaxSubscriber::new(op, &mut sink).observe(TracingObserver);
        if drain {
            let outcome = publish(inputs, &mut sub);
            debug!(?outcome, "source finished");
        } else {
            sub.on_subscribe();
            for item in inputs {
                match item {
                    Ok(v) => {
                        if !sub.on_next(v).wants_more() {
                            break;
                        }
                    }
                    Err(e) => {
                        sub.on_complete(Completion::Failed(e));
                        break;
                    }
                }
            }
            sub.cancel();
        }
    }

    let failure = match sink.into_completion() {
        Some(Completion::Failed(e)) => Some(e),
        _ => None,
    };
    Ok((outputs, failure))
}

/// Logs go to stderr; stdout carries only values. `RUST_LOG` wins over
/// `--log-level` when set.
fn init_logging(level: &str, format: LogFormat) -> Result<()> {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .with_context(|| format!("invalid log level {level:?}"))?,
    };
    let layer = fmt::layer().with_writer(std::io::stderr).with_target(true);
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(layer.json()).try_init(),
        LogFormat::Text => registry.with(layer).try_init(),
    }
    .context("failed to install log subscriber")
}
