#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

use octoagents::cli::Cli;
use octoagents::config::Config;
use octoagents::install::{self, InstallOptions, InstallReport, InstallTarget};
use octoagents::providers::{self, ProviderAvailability};
use octoagents::utils::HostEnv;
use octoagents::{prompt, update_check};

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env("OCTOAGENTS_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        eprintln!("Run with --help for usage information.");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let env = HostEnv::from_process();
    let config = Config::load(&env, &cwd)?.with_cli_overrides(&cli);

    let target = match (&cli.target, cli.scope) {
        (Some(path), _) => InstallTarget::Path(path.clone()),
        (None, Some(scope)) => InstallTarget::Scope(scope),
        (None, None) => InstallTarget::Scope(prompt::ask_scope_stdin()),
    };

    let providers = match cli.provider {
        Some(tier) => ProviderAvailability::forced(tier),
        None => {
            let detected = providers::detect(&env);
            if !detected.any() && std::io::stdin().is_terminal() {
                ProviderAvailability::forced(prompt::ask_provider_stdin())
            } else {
                detected
            }
        }
    };

    let options = InstallOptions {
        target,
        preset: config.preset(),
        clean: cli.clean,
        dry_run: cli.dry_run,
        no_overrides: cli.no_overrides,
        plugins: config.plugins(),
        providers: Some(providers),
        templates: config.template_store(&cwd)?,
        customizations: config.customizations()?,
    };

    let report = install::install(&options, &env, &cwd)?;
    print_report(&report);

    if which::which("opencode").is_err() {
        tracing::warn!("opencode was not found on PATH; install it from https://opencode.ai");
    }

    if !report.dry_run {
        update_check::check_and_notify(&config.update_check_config());
    }

    Ok(())
}

fn print_report(report: &InstallReport) {
    println!();
    println!("Models ({} agents):", report.assignments.len());
    for assignment in &report.assignments {
        println!(
            "  {:<12} {:<8} {}",
            assignment.role.as_str(),
            assignment.tier.as_str(),
            assignment.model
        );
    }

    if !report.plugins_applied.is_empty() {
        println!("Plugins: {}", report.plugins_applied.join(", "));
    }

    for failure in &report.failures {
        println!("  ! {}", failure);
    }

    if report.dry_run {
        println!(
            "Dry run: {} files would be written to {}; nothing was changed.",
            report.files_written,
            report.root.display()
        );
    } else {
        println!(
            "Installed preset '{}' into {} ({} files written, {} kept).",
            report.preset,
            report.root.display(),
            report.files_written,
            report.files_skipped
        );
    }
}
