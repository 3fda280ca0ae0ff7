//! `tissage`: set up and build a tissage site.

use std::env;
use std::process::ExitCode;

use camino::Utf8PathBuf;
use eyre::{Result, WrapErr};
use facet::Facet;
use facet_args as args;
use owo_colors::OwoColorize;
use tissage_site::{ResolvedConfig, global_config, set_global_config};
use tracing::info;
use tracing_subscriber::prelude::*;

/// Init command - create the output directory and copy assets
#[derive(Facet, Debug)]
struct InitArgs {
    /// Output directory, overriding the configured one
    #[facet(args::named, args::short = 'o', default)]
    output: Option<String>,
}

/// Build command - init, then generate every page
#[derive(Facet, Debug)]
struct BuildArgs {
    /// Output directory, overriding the configured one
    #[facet(args::named, args::short = 'o', default)]
    output: Option<String>,
}

#[derive(Facet, Debug)]
#[repr(u8)]
enum Command {
    /// Create the output directory and copy assets
    Init(InitArgs),
    /// Copy assets and generate all pages
    Build(BuildArgs),
}

#[derive(Facet, Debug)]
struct Args {
    #[facet(args::subcommand)]
    command: Command,
}

fn parse_args() -> Result<Command, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    let args_refs: Vec<&str> = args.iter().map(|s| s.as_str()).collect();

    let parsed: Args = facet_args::from_slice(&args_refs).map_err(|e| {
        eprintln!("{:?}", miette::Report::new(e));
        "Failed to parse arguments".to_string()
    })?;

    Ok(parsed.command)
}

fn init_tracing() {
    let filter = tracing_subscriber::filter::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::filter::EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true).compact();
    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();
}

fn load_config(output: Option<String>) -> Result<&'static ResolvedConfig> {
    let mut config =
        ResolvedConfig::discover_or_default().wrap_err("Failed to load .config/tissage.yaml")?;
    if let Some(output) = output {
        config = config.with_output(&Utf8PathBuf::from(output));
    }
    let _ = set_global_config(config);
    global_config().ok_or_else(|| eyre::eyre!("Global config not initialized"))
}

fn run(cmd: Command) -> Result<()> {
    match cmd {
        Command::Init(args) => {
            let config = load_config(args.output)?;
            let env = tissage_site::init(config).wrap_err("Failed to set up the environment")?;
            println!("{}", env.summary().green());
        }
        Command::Build(args) => {
            let config = load_config(args.output)?;
            info!("Setting up environment...");
            let generated = tissage_site::build(config)
                .wrap_err_with(|| format!("Failed to build into {}", config.output_dir))?;
            for line in &generated {
                println!("{line}");
            }
            let index = config.output_dir.join(
                config
                    .pages
                    .first()
                    .map(|p| p.filename.as_str())
                    .unwrap_or("index.html"),
            );
            println!(
                "{} Open {} in a web browser.",
                "Build complete!".green().bold(),
                index.cyan()
            );
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    // Set up miette for nice error formatting
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .build(),
        )
    }))
    .ok();

    init_tracing();

    let cmd = match parse_args() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            return ExitCode::FAILURE;
        }
    };

    match run(cmd) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {:?}", "error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
