//! CLI entry point for spokecheck.
//!
//! This module is intentionally thin: it handles argument parsing, environment, logging, I/O,
//! and exit codes. All business logic lives in the `spokecheck-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand, ValueEnum};
use spokecheck_app::{
    parse_report_json, render_html, render_markdown, run_check, run_explain, serialize_report,
    to_renderable, verdict_exit_code, CheckInput, ExplainOutput, EXIT_ERROR,
};
use spokecheck_facts::{Cancellation, FactProvider, OutputsFileProvider, TerraformProvider};
use spokecheck_settings::{split_dns_list, Overrides, ResolvedConfig};
use spokecheck_types::SpokecheckReport;
use tracing::{debug, error, warn};
use tracing_subscriber::EnvFilter;

const ENV_HUB: &str = "HUB_VNET_ID";
const ENV_DNS: &str = "DEFAULT_DNS";
const ENV_TF_CONF: &str = "TF_CONF_PATH";
const ENV_TF_BIN: &str = "TF_BIN_PATH";

#[derive(Parser, Debug)]
#[command(
    name = "spokecheck",
    version,
    about = "Hub/spoke virtual network topology compliance checker"
)]
struct Cli {
    /// Path to spokecheck config TOML (a missing default file is allowed).
    #[arg(long, default_value = "spokecheck.toml")]
    config: Utf8PathBuf,

    /// Hub virtual network id (overrides HUB_VNET_ID and the config file).
    #[arg(long)]
    hub: Option<String>,

    /// Override profile (strict|exhaustive).
    #[arg(long)]
    profile: Option<String>,

    /// Override short-circuit behavior (on_disconnected|never).
    #[arg(long)]
    short_circuit: Option<String>,

    /// Comma-separated allowed DNS servers (overrides DEFAULT_DNS and the config file).
    #[arg(long)]
    allowed_dns: Option<String>,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG applies when not given.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log output format on stderr.
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check one spoke against the hub and write the report.
    Check {
        /// Spoke virtual network id.
        #[arg(long)]
        spoke: String,

        /// Read facts from a saved `terraform output -json` document instead of running terraform.
        #[arg(long)]
        outputs: Option<Utf8PathBuf>,

        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/spokecheck/report.json")]
        report_out: Utf8PathBuf,

        /// Write a Markdown report alongside the JSON.
        #[arg(long)]
        write_markdown: bool,

        /// Where to write the Markdown report (if enabled).
        #[arg(long, default_value = "artifacts/spokecheck/report.md")]
        markdown_out: Utf8PathBuf,

        /// Write an HTML report alongside the JSON.
        #[arg(long)]
        write_html: bool,

        /// Where to write the HTML report (if enabled).
        #[arg(long, default_value = "artifacts/spokecheck/report.html")]
        html_out: Utf8PathBuf,
    },

    /// Render Markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/spokecheck/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render an HTML page from an existing JSON report.
    Html {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/spokecheck/report.json")]
        report: Utf8PathBuf,

        /// Where to write the HTML output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Explain a rule id with remediation guidance.
    Explain {
        /// The rule id (e.g. "peering-connected").
        identifier: String,
    },
}

struct CheckArgs {
    spoke: String,
    outputs: Option<Utf8PathBuf>,
    report_out: Utf8PathBuf,
    markdown_out: Option<Utf8PathBuf>,
    html_out: Option<Utf8PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_format);

    match cli.cmd {
        Commands::Check {
            ref spoke,
            ref outputs,
            ref report_out,
            write_markdown,
            ref markdown_out,
            write_html,
            ref html_out,
        } => {
            let args = CheckArgs {
                spoke: spoke.clone(),
                outputs: outputs.clone(),
                report_out: report_out.clone(),
                markdown_out: write_markdown.then(|| markdown_out.clone()),
                html_out: write_html.then(|| html_out.clone()),
            };
            cmd_check(&cli, args)
        }
        Commands::Md { report, output } => cmd_md(report, output),
        Commands::Html { report, output } => cmd_html(report, output),
        Commands::Explain { identifier } => cmd_explain(&identifier),
    }
}

fn init_tracing(verbose: u8, format: LogFormat) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    let fmt = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Json => fmt.json().init(),
        LogFormat::Text => fmt.init(),
    }
}

/// CLI flags first, then the environment the service was deployed with.
fn overrides_from(cli: &Cli) -> Overrides {
    let env = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());
    Overrides {
        profile: cli.profile.clone(),
        hub_network_id: cli.hub.clone().or_else(|| env(ENV_HUB)),
        allowed_dns_servers: cli
            .allowed_dns
            .clone()
            .or_else(|| env(ENV_DNS))
            .map(|raw| split_dns_list(&raw)),
        short_circuit: cli.short_circuit.clone(),
        terraform_config_dir: env(ENV_TF_CONF),
        terraform_binary: env(ENV_TF_BIN),
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<ResolvedConfig> {
    let cfg_text = if cli.config.exists() {
        std::fs::read_to_string(&cli.config)
            .with_context(|| format!("read config: {}", cli.config))?
    } else {
        debug!(path = %cli.config, "no config file; using defaults");
        String::new()
    };

    let cfg = if cfg_text.trim().is_empty() {
        spokecheck_settings::SpokecheckConfigV1::default()
    } else {
        spokecheck_settings::parse_config_toml(&cfg_text).context("parse config")?
    };
    spokecheck_settings::resolve_config(cfg, overrides_from(cli)).context("resolve config")
}

fn cmd_check(cli: &Cli, args: CheckArgs) -> anyhow::Result<()> {
    let config = load_config(cli)?;

    let provider: Box<dyn FactProvider> = match &args.outputs {
        Some(path) => Box::new(OutputsFileProvider::new(
            path.clone(),
            config.allowed_dns_servers.clone(),
        )),
        None => {
            let cancellation = Cancellation::new();
            let on_interrupt = cancellation.clone();
            ctrlc::set_handler(move || {
                warn!("interrupt received, stopping after the current terraform step");
                on_interrupt.cancel();
            })
            .context("install interrupt handler")?;

            Box::new(
                TerraformProvider::new(
                    config.terraform.clone(),
                    config.allowed_dns_servers.clone(),
                )
                .with_cancellation(cancellation),
            )
        }
    };

    let input = CheckInput {
        spoke_network_id: &args.spoke,
        config: &config,
    };

    let output = match run_check(input, provider.as_ref()) {
        Ok(output) => output,
        Err(err) => {
            error!(error = %error_chain(&err), "check failed");
            eprintln!("spokecheck: {}", err.user_message());
            std::process::exit(EXIT_ERROR);
        }
    };

    write_artifacts(&output.report, &args)?;

    let code = verdict_exit_code(output.report.verdict);
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

/// Flatten the error chain into one message for the log line.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        msg.push_str(": ");
        msg.push_str(&inner.to_string());
        source = inner.source();
    }
    msg
}

fn write_artifacts(report: &SpokecheckReport, args: &CheckArgs) -> anyhow::Result<()> {
    let data = serialize_report(report).context("serialize report")?;
    write_file(&args.report_out, &data).context("write report json")?;

    if args.markdown_out.is_some() || args.html_out.is_some() {
        let renderable = to_renderable(report);
        if let Some(path) = &args.markdown_out {
            write_file(path, render_markdown(&renderable).as_bytes()).context("write markdown")?;
        }
        if let Some(path) = &args.html_out {
            write_file(path, render_html(&renderable).as_bytes()).context("write html")?;
        }
    }
    Ok(())
}

fn write_file(path: &Utf8Path, data: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    std::fs::write(path, data).with_context(|| format!("write: {}", path))?;
    Ok(())
}

fn read_report(path: &Utf8Path) -> anyhow::Result<SpokecheckReport> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("read report: {}", path))?;
    parse_report_json(&text)
}

fn cmd_md(report_path: Utf8PathBuf, output: Option<Utf8PathBuf>) -> anyhow::Result<()> {
    let report = read_report(&report_path)?;
    let md = render_markdown(&to_renderable(&report));

    if let Some(out_path) = output {
        write_file(&out_path, md.as_bytes()).context("write markdown output")?;
    } else {
        print!("{}", md);
    }
    Ok(())
}

fn cmd_html(report_path: Utf8PathBuf, output: Option<Utf8PathBuf>) -> anyhow::Result<()> {
    let report = read_report(&report_path)?;
    let html = render_html(&to_renderable(&report));

    if let Some(out_path) = output {
        write_file(&out_path, html.as_bytes()).context("write html output")?;
    } else {
        print!("{}", html);
    }
    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", spokecheck_app::format_explanation(&exp));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available_rule_ids,
        } => {
            eprint!(
                "{}",
                spokecheck_app::format_not_found(&identifier, available_rule_ids)
            );
            std::process::exit(EXIT_ERROR);
        }
    }
}
