//! `sourcegate` command-line tool.
//!
//! Routes tagged resource descriptors, merges records, measures text or item
//! lists, and loads flag stores. Results go to stdout as JSON or plain text;
//! logs go to stderr.

use std::collections::BTreeMap;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Value as Json};
use sourcegate_core::{
    measure, merge_objects, Access, AccessStatus, CombinedRecord, DatabaseSource, FileSource,
    Flag, Measurable, ResourceKind, Value,
};
use sourcegate_router::telemetry::init_tracing;
use sourcegate_router::{
    AppConfig, ConstrainedStore, LogConfig, LogFormat, ResourceHandler, ResourceRouter,
    StoreConfig,
};

#[derive(Debug, Parser)]
#[command(name = "sourcegate", version, about = "Tag-directed resource routing toolkit")]
struct Cli {
    /// Log filter directive (overridden by `RUST_LOG`).
    #[arg(long, global = true, env = "SOURCEGATE_LOG", default_value = "warn")]
    log_level: String,

    /// Log output format.
    #[arg(long, global = true, value_enum, env = "SOURCEGATE_LOG_FORMAT", default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Classify a tagged JSON descriptor and route it to its handler.
    Route {
        /// Descriptor, e.g. '{"kind":"file","path":"a.csv"}'.
        descriptor: String,
    },
    /// Shallow-merge two JSON objects; fields of the second win.
    Merge {
        first: String,
        second: String,
    },
    /// Count words in TEXT, or items in a JSON array given with --items.
    Measure {
        #[arg(required_unless_present = "items")]
        text: Option<String>,
        #[arg(long, conflicts_with = "text")]
        items: Option<String>,
    },
    /// Load KEY=VALUE pairs into a boolean-or-number flag store and print it.
    Flags {
        /// Maximum number of distinct flags.
        #[arg(long, env = "SOURCEGATE_MAX_FLAGS")]
        max_flags: Option<usize>,
        /// Assignments; VALUE is parsed as JSON, falling back to a string.
        /// Integers and floats are kept as given.
        assignments: Vec<String>,
    },
}

impl Cli {
    fn app_config(&self) -> AppConfig {
        let flags = match &self.command {
            Command::Flags {
                max_flags: Some(max),
                ..
            } => StoreConfig::bounded(*max),
            _ => StoreConfig::unbounded(),
        };
        AppConfig {
            log: LogConfig {
                filter: self.log_level.clone(),
                format: self.log_format,
            },
            flags,
        }
    }
}

/// Reports the narrowed source of each descriptor without opening it.
struct AccessReporter;

impl ResourceHandler for AccessReporter {
    type Output = serde_json::Result<Json>;

    fn on_file(&self, source: FileSource) -> Self::Output {
        report(ResourceKind::File, &Access::new(source, AccessStatus::closed()))
    }

    fn on_database(&self, source: DatabaseSource) -> Self::Output {
        report(ResourceKind::Database, &Access::new(source, AccessStatus::closed()))
    }
}

fn report<S: serde::Serialize>(kind: ResourceKind, access: &Access<S>) -> serde_json::Result<Json> {
    Ok(json!({ "kind": kind, "access": serde_json::to_value(access)? }))
}

fn parse_json(label: &str, raw: &str) -> Result<Json> {
    serde_json::from_str(raw).with_context(|| format!("{label} is not valid JSON"))
}

fn run_route(raw: &str) -> Result<Json> {
    let router = ResourceRouter::from_handler(AccessReporter);
    let out = router.route_tagged(parse_json("descriptor", raw)?)??;
    Ok(out)
}

fn run_merge(first: &str, second: &str) -> Result<CombinedRecord> {
    let a = CombinedRecord::from_serialize(&parse_json("first record", first)?)
        .context("first argument")?;
    let b = CombinedRecord::from_serialize(&parse_json("second record", second)?)
        .context("second argument")?;
    Ok(merge_objects(a, b))
}

fn run_measure(text: Option<&str>, items: Option<&str>) -> Result<String> {
    let measurement = match (text, items) {
        (_, Some(raw)) => {
            let items: Vec<Value> =
                serde_json::from_str(raw).context("--items must be a JSON array")?;
            measure(Measurable::Items(&items))
        }
        (Some(text), None) => measure(Measurable::Text(text)),
        (None, None) => bail!("nothing to measure"),
    };
    Ok(measurement.to_string())
}

fn run_flags(config: StoreConfig, assignments: &[String]) -> Result<BTreeMap<String, Flag>> {
    let store = ConstrainedStore::<Flag>::with_config(config);
    for assignment in assignments {
        let (key, raw) = assignment
            .split_once('=')
            .with_context(|| format!("expected KEY=VALUE, got `{assignment}`"))?;
        let value = serde_json::from_str::<Json>(raw)
            .map_or_else(|_| Value::from(raw), Value::from);
        store.set_value(key, value)?;
    }
    Ok(store.snapshot().into_iter().collect())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.app_config();
    init_tracing(&config.log)?;
    tracing::debug!(?config, "starting");

    match cli.command {
        Command::Route { descriptor } => {
            println!("{}", run_route(&descriptor)?);
        }
        Command::Merge { first, second } => {
            println!("{}", serde_json::to_string(&run_merge(&first, &second)?)?);
        }
        Command::Measure { text, items } => {
            println!("{}", run_measure(text.as_deref(), items.as_deref())?);
        }
        Command::Flags { assignments, .. } => {
            let flags = run_flags(config.flags, &assignments)?;
            println!("{}", serde_json::to_string(&flags)?);
        }
    }

    Ok(())
}
