//! Console entry point.
//!
//! Thin line-oriented shell over the library: reads one command per line from
//! stdin, turns it into an [`Event`] for the [`Runtime`], and prints the
//! resulting screen and notifications to stdout.
//!
//! # Usage
//!
//! ```text
//! product-hub [--config <FILE>] [KEY=VALUE ...]
//! ```
//!
//! `KEY=VALUE` pairs override the file; see [`Config`] for the keys.
//!
//! # Lifecycle
//!
//! 1. **Load**: parse arguments and configuration, initialize tracing, open
//!    store and enrichment client
//! 2. **Refresh**: fetch the catalog and render the table
//! 3. **Loop**: parse each line, dispatch, render
//! 4. **Exit**: on `quit` or end of input

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use product_hub::app::command::HELP;
use product_hub::app::{parse_command, Command, Runtime};
use product_hub::enrichment::Enricher;
use product_hub::storage::ProductStore;
use product_hub::ui::{
    render_catalog, render_details, render_enrichment, render_notifications, render_options,
    DetailView,
};
use product_hub::{CatalogError, Config, Event};

#[derive(Parser, Debug)]
#[command(
    name = "product-hub",
    version,
    about = "Admin console for a product catalog",
    after_help = "Keys: store, store_path, store_url, store_api_key, enrichment_url, \
                  enrichment_timeout_secs, log_level, log_file"
)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Settings applied on top of the file, e.g. `store=rest`
    #[arg(value_name = "KEY=VALUE", value_parser = parse_override)]
    overrides: Vec<(String, String)>,
}

impl Cli {
    /// Loads the configuration file, if any, and applies the overrides.
    fn into_config(self) -> product_hub::Result<Config> {
        let mut config = match self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        let overrides: BTreeMap<String, String> = self.overrides.into_iter().collect();
        config.merge_map(&overrides);
        Ok(config)
    }
}

fn parse_override(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{arg}'")),
    }
}

fn main() -> ExitCode {
    let config = match Cli::parse().into_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("product-hub: {e}");
            return ExitCode::FAILURE;
        }
    };

    product_hub::observability::init_tracing(&config);

    let runtime = {
        let _span = tracing::debug_span!("console_load").entered();
        product_hub::initialize(&config)
    };

    match runtime {
        Ok(mut runtime) => match run(&mut runtime, io::stdin().lock(), io::stdout().lock()) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                tracing::error!(error = %e, "console failed");
                eprintln!("product-hub: {e}");
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            tracing::error!(error = %e, "failed to start");
            eprintln!("product-hub: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run<S, E>(runtime: &mut Runtime<S, E>, input: impl BufRead, mut out: impl Write) -> io::Result<()>
where
    S: ProductStore,
    E: Enricher,
{
    runtime.dispatch(Event::Refresh);
    write!(out, "{}", render_catalog(runtime.state()))?;
    flush_notifications(runtime, &mut out)?;

    for line in input.lines() {
        let line = line?;
        let _span = tracing::debug_span!("console_line", line = %line).entered();

        let command = match parse_command(&line, runtime.state()) {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "{e}")?;
                continue;
            }
        };

        match command {
            Command::Dispatch(event) => {
                let enrich = matches!(event, Event::EnrichProduct(_));
                if runtime.dispatch(event) {
                    match runtime.state().pending_enrichment.as_ref().filter(|_| enrich) {
                        Some(pending) => write!(out, "{}", render_enrichment(pending))?,
                        None => write!(out, "{}", render_catalog(runtime.state()))?,
                    }
                }
                flush_notifications(runtime, &mut out)?;
            }
            Command::Show(id) => match runtime.state().product(id) {
                Some(product) => write!(out, "{}", render_details(&DetailView::from_product(product)))?,
                None => writeln!(out, "{}", CatalogError::ProductNotFound(id))?,
            },
            Command::Options => write!(out, "{}", render_options(runtime.state().options()))?,
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => break,
            Command::Nothing => {}
        }
        out.flush()?;
    }

    tracing::debug!("console closed");
    Ok(())
}

fn flush_notifications<S, E>(runtime: &mut Runtime<S, E>, out: &mut impl Write) -> io::Result<()>
where
    S: ProductStore,
    E: Enricher,
{
    write!(out, "{}", render_notifications(&runtime.take_notifications()))
}
