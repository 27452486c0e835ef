//! CLI entry point for cspconf.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `cspconf-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand, ValueEnum};
use cspconf_app::{ExplainInput, HeaderInput, NonceMode, run_explain, run_header};
use cspconf_render::{render_header_lines, render_json, render_markdown};
use cspconf_settings::Overrides;
use cspconf_types::PolicyKind;

#[derive(Parser, Debug)]
#[command(
    name = "cspconf",
    version,
    about = "Route-aware Content-Security-Policy header resolution"
)]
struct Cli {
    /// Path to the CSP config TOML.
    #[arg(long, default_value = "csp.toml")]
    config: Utf8PathBuf,

    /// Also emit child-src as frame-src (deprecated, CSP level 1 browsers only).
    #[arg(long)]
    support_legacy_browsers: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute the header value(s) for a route.
    Header {
        /// Route identifier, e.g. `Admin:Products:detail`.
        route: String,

        /// Snippet to add to the policy (repeatable, applied in order).
        #[arg(long = "snippet")]
        snippets: Vec<String>,

        /// Use this nonce instead of a random one.
        #[arg(long, conflicts_with = "no_nonce")]
        nonce: Option<String>,

        /// Leave `'nonce'` placeholders untouched.
        #[arg(long)]
        no_nonce: bool,

        /// Only compute Content-Security-Policy-Report-Only.
        #[arg(long)]
        report_only: bool,

        /// Output format.
        #[arg(long, value_enum, default_value = "line")]
        format: OutputFormat,
    },

    /// Explain how a route's policy is assembled (Markdown).
    Explain {
        /// Route identifier, e.g. `Admin:Products:detail`.
        route: String,

        /// Snippet to add to the policy (repeatable, applied in order).
        #[arg(long = "snippet")]
        snippets: Vec<String>,

        /// Explain the report-only policy instead.
        #[arg(long)]
        report_only: bool,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Header values only, one per line.
    Value,
    /// `Header-Name: value` lines.
    Line,
    /// JSON object with headers and nonce.
    Json,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        eprintln!("cspconf error: {err:#}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("CSPCONF_LOG")
        .unwrap_or_else(|_| "warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    tracing::debug!(config = %cli.config, "reading config");
    let config_text = std::fs::read_to_string(&cli.config)
        .with_context(|| format!("read config: {}", cli.config))?;
    let overrides = Overrides {
        support_legacy_browsers: cli.support_legacy_browsers.then_some(true),
    };

    match &cli.cmd {
        Commands::Header {
            route,
            snippets,
            nonce,
            no_nonce,
            report_only,
            format,
        } => {
            let nonce = match (nonce, no_nonce) {
                (_, true) => NonceMode::Disabled,
                (Some(value), false) => NonceMode::Fixed(value.clone()),
                (None, false) => NonceMode::Random,
            };
            cmd_header(
                HeaderInput {
                    config_text: &config_text,
                    overrides,
                    route,
                    snippets: snippets.clone(),
                    report_only: *report_only,
                    nonce,
                },
                *format,
            )
        }
        Commands::Explain {
            route,
            snippets,
            report_only,
            output,
        } => {
            let kind = if *report_only {
                PolicyKind::ReportOnly
            } else {
                PolicyKind::Enforce
            };
            cmd_explain(
                ExplainInput {
                    config_text: &config_text,
                    overrides,
                    route,
                    snippets: snippets.clone(),
                    kind,
                },
                output.as_deref(),
            )
        }
    }
}

fn cmd_header(input: HeaderInput<'_>, format: OutputFormat) -> anyhow::Result<()> {
    let output = run_header(input)?;

    match format {
        OutputFormat::Value => {
            for header in &output.headers {
                println!("{}", header.value);
            }
        }
        OutputFormat::Line => {
            for line in render_header_lines(&output.headers) {
                println!("{}", line);
            }
        }
        OutputFormat::Json => {
            let value = render_json(&output.headers, output.nonce.as_deref());
            let text = serde_json::to_string_pretty(&value).context("serialize headers")?;
            println!("{}", text);
        }
    }

    Ok(())
}

fn cmd_explain(input: ExplainInput<'_>, output: Option<&Utf8Path>) -> anyhow::Result<()> {
    let explained = run_explain(input)?;
    let md = render_markdown(&explained);

    if let Some(out_path) = output {
        write_text_file(out_path, &md).context("write markdown output")?;
    } else {
        print!("{}", md);
    }

    Ok(())
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    std::fs::write(path, text).with_context(|| format!("write text: {}", path))?;
    Ok(())
}
