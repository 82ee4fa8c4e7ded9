use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry, reload};

mod cli;
mod commands;
mod context;
mod output;

const LOG_ENV: &str = "ARBOR_LOG";

type FilterHandle = reload::Handle<EnvFilter, Registry>;

fn main() {
    if let Err(error) = run() {
        eprintln!("arbor error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let flags = cli.global_flags();

    // Installed before config loading so its warnings are not lost.
    let filter = init_tracing(flags.quiet, flags.verbose)?;
    let mut ctx = context::AppContext::init(&flags)?;
    if let Some(filter) = filter {
        if !flags.quiet && !flags.verbose && ctx.config.general.verbose_logging {
            filter
                .reload(EnvFilter::new(default_level(false, true)))
                .map_err(|error| anyhow::anyhow!("failed to raise log level: {error}"))?;
        }
    }
    context::warn_misnamed_env();

    let result = commands::dispatch::dispatch(&cli.command, &mut ctx, &flags);
    ctx.save_session();
    result
}

fn default_level(quiet: bool, verbose: bool) -> &'static str {
    if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    }
}

/// Install the stderr subscriber. Returns a handle for adjusting the level
/// later, or `None` when `ARBOR_LOG` fixes the filter.
fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<Option<FilterHandle>> {
    let (filter, from_env) = match EnvFilter::try_from_env(LOG_ENV) {
        Ok(filter) => (filter, true),
        Err(_) => (EnvFilter::new(default_level(quiet, verbose)), false),
    };
    let (filter, handle) = reload::Layer::new(filter);

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok((!from_env).then_some(handle))
}
