use std::{io, path::PathBuf};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tracing::debug;
use warc_core::{PageKind, models::ScenarioColumn, pages::scenario::column_header};
use warc_ui::{
    app::{self, SubmitOptions},
    config::DashboardConfig,
    logging, render,
};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// W-ARC water management dashboard.
///
/// Collects form input for one of the prediction pages, sends it to the
/// page's model service and prints the result.
#[derive(Debug, Parser)]
#[command(name = "warc", version, about, long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level or filter directive (overrides the config file).
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Append logs to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Keep logs off stdout.
    #[arg(short, long, global = true, default_value_t = false)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the dashboard pages.
    Pages,

    /// Show a page's form fields.
    Fields {
        /// leak, irrigation, rainwater or scenarios
        page: PageKind,
    },

    /// Fill in a page's form and submit it.
    Submit {
        /// leak, irrigation, rainwater or scenarios
        page: PageKind,

        /// Set a field, e.g. `--set pressure=80`. Repeatable.
        #[arg(short, long = "set", value_name = "KEY=VALUE", value_parser = app::parse_assignment)]
        set: Vec<(String, String)>,

        /// Prompt for every field on stdin.
        #[arg(short, long, default_value_t = false)]
        interactive: bool,

        /// Submit one form per CSV row, headers naming fields.
        #[arg(long, conflicts_with_all = ["set", "interactive"])]
        csv: Option<PathBuf>,

        /// Send to this URL instead of the configured endpoint.
        #[arg(long)]
        endpoint: Option<String>,
    },

    /// Describe a column of the scenario table.
    Explain {
        /// Column key or header, e.g. `Water_Saved` or "soil moisture".
        column: ScenarioColumn,
    },
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = DashboardConfig::load_or_default(cli.config.as_deref())
        .context("failed to load configuration")?;
    if let Some(level) = cli.log_level {
        config.logging.level = Some(level);
    }
    if let Some(file) = cli.log_file {
        config.logging.file = Some(file);
    }
    if cli.quiet {
        config.logging.stdout = false;
    }
    logging::init(&config.logging).context("failed to initialize logging")?;

    match cli.command {
        Command::Pages => print!("{}", render::page_list()),
        Command::Fields { page } => {
            println!("{}\n", page.title());
            print!("{}", render::field_list(page.schema()));
        }
        Command::Explain { column } => {
            println!("{}: {}", column_header(column), column.description());
        }
        Command::Submit {
            page,
            set,
            interactive,
            csv,
            endpoint,
        } => {
            if let Some(endpoint) = endpoint {
                config.set_endpoint(page, endpoint);
            }

            let service_config = config.service_config();
            debug!("creating {} service backend", service_config.backend);
            let service = app::build_registry()
                .create(&service_config)
                .await
                .context("failed to create prediction service")?;

            let options = SubmitOptions {
                assignments: set,
                interactive,
                csv,
            };
            let summary = app::submit_page(
                page,
                &config,
                &*service,
                &options,
                &mut io::stdin().lock(),
                &mut io::stdout().lock(),
            )
            .await?;

            if summary.failed > 0 || summary.invalid > 0 {
                bail!(
                    "{} of {} submission(s) did not succeed",
                    summary.failed + summary.invalid,
                    summary.failed + summary.invalid + summary.succeeded
                );
            }
        }
    }

    Ok(())
}
