use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::io::Write;

use cleansweep::catalog::{Catalog, Environment};
use cleansweep::cleaner::{self, CancelToken, CleanEvent};
use cleansweep::cli::args::{Cli, Commands, ConfigAction, OutputFormat};
use cleansweep::cli::output;
use cleansweep::common::config::Config;
use cleansweep::common::format;
use cleansweep::scanner::{self, ScanOptions};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let _log_guard = init_logging(&cli);

    match cli.command {
        Commands::Scan => cmd_scan(&cli),

        Commands::Clean {
            yes,
            no_maintenance,
        } => cmd_clean(&cli, yes, no_maintenance),

        Commands::Targets => cmd_targets(&cli),

        Commands::Config { ref action } => cmd_config(action),

        Commands::Completions { ref shell } => {
            use clap::CommandFactory;
            let mut cmd = Cli::command();
            let shell = match shell {
                cleansweep::cli::args::CompletionShell::Bash => clap_complete::Shell::Bash,
                cleansweep::cli::args::CompletionShell::Zsh => clap_complete::Shell::Zsh,
                cleansweep::cli::args::CompletionShell::Fish => clap_complete::Shell::Fish,
            };
            clap_complete::generate(shell, &mut cmd, "cleansweep", &mut std::io::stdout());
            Ok(())
        }
    }
}

// ─── Logging ──────────────────────────────────────────────────────────────────

fn init_logging(cli: &Cli) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if cli.verbose {
        EnvFilter::new("cleansweep=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let (file_layer, guard) = if cli.log_file {
        match Config::init_dirs() {
            Ok(()) => {
                let appender = tracing_appender::rolling::daily(Config::logs_dir(), "cleansweep.log");
                let (writer, guard) = tracing_appender::non_blocking(appender);
                let layer = fmt::layer().with_ansi(false).with_writer(writer);
                (Some(layer), Some(guard))
            }
            Err(e) => {
                eprintln!("  {} Log file disabled: {:#}", "⚠".yellow(), e);
                (None, None)
            }
        }
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}

/// Config plus an environment snapshot for the resolved platform
fn load_context(cli: &Cli) -> Result<(Config, Environment)> {
    let config = Config::load()?;
    let platform = config.resolve_platform(cli.platform.as_deref())?;
    tracing::debug!("platform: {}", platform);
    Ok((config, Environment::capture(platform)))
}

// ─── Scan ─────────────────────────────────────────────────────────────────────

fn cmd_scan(cli: &Cli) -> Result<()> {
    let (config, env) = load_context(cli)?;
    let options = ScanOptions {
        show_progress: !cli.quiet && matches!(cli.format, OutputFormat::Human),
    };

    let report = scanner::scan(&env, &config, &options);

    match cli.format {
        OutputFormat::Human => output::print_scan_results(&report),
        OutputFormat::Json => output::print_scan_json(&report),
        OutputFormat::Quiet => output::print_scan_quiet(&report),
    }

    Ok(())
}

// ─── Clean ────────────────────────────────────────────────────────────────────

fn cmd_clean(cli: &Cli, yes: bool, no_maintenance: bool) -> Result<()> {
    let (mut config, env) = load_context(cli)?;
    if no_maintenance {
        config.maintenance = false;
    }

    // Confirm unless --yes
    if !yes {
        if !matches!(cli.format, OutputFormat::Human) {
            anyhow::bail!("Refusing to clean without --yes when output is not human-readable");
        }

        let options = ScanOptions {
            show_progress: !cli.quiet,
        };
        let report = scanner::scan(&env, &config, &options);
        output::print_scan_results(&report);
        if report.is_empty() {
            return Ok(());
        }

        print!(
            "\n  {} PERMANENTLY DELETE {} across {} categories? [y/N] ",
            "❓",
            format::format_size(report.total),
            report.categories.len()
        );
        std::io::stdout().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("  {} Cancelled", "✗".red());
            return Ok(());
        }
    }

    if matches!(cli.format, OutputFormat::Human) && !cli.quiet {
        println!();
        println!("{}  Cleaning ({})", "🧹", env.platform());
        println!("{}", "─".repeat(60).dimmed());
    }

    let cancel = CancelToken::new();
    let stream = cleaner::clean(&env, &config, cancel.clone());
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    for event in stream {
        if cancel.is_cancelled() {
            if let CleanEvent::Done(done) = &event {
                tracing::debug!(
                    "stopped early: {} freed, {} errors",
                    done.total_freed,
                    done.errors
                );
            }
            continue;
        }

        if let Err(e) = output::write_clean_event(&mut out, &event, &cli.format, cli.quiet) {
            // Reader went away; stop before the next category
            tracing::debug!("output closed: {}", e);
            cancel.cancel();
        }
    }

    Ok(())
}

// ─── Targets ──────────────────────────────────────────────────────────────────

fn cmd_targets(cli: &Cli) -> Result<()> {
    let (config, env) = load_context(cli)?;
    let catalog = Catalog::for_environment(&env).excluding(&config);

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&catalog)?),
        OutputFormat::Quiet => {
            for category in &catalog {
                println!("{}", category.name);
            }
        }
        OutputFormat::Human => output::print_targets(&catalog),
    }

    Ok(())
}

// ─── Config ───────────────────────────────────────────────────────────────────

fn cmd_config(action: &ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Init => {
            Config::init_dirs()?;
            let config = Config::default();
            config.save()?;
            println!("  {} CleanSweep initialized at ~/.cleansweep", "✓".green());
            println!("  Created: config.toml, logs/");
            Ok(())
        }
        ConfigAction::Show => {
            let config = Config::load()?;
            println!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
        ConfigAction::Reset => {
            let config = Config::default();
            config.save()?;
            println!("  {} Configuration reset to defaults", "✓".green());
            Ok(())
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            match key.as_str() {
                "pacing_ms" => config.pacing_ms = value.parse()?,
                "maintenance" => config.maintenance = value.parse()?,
                "platform" => {
                    let platform: cleansweep::common::platform::Platform = value.parse()?;
                    config.platform = Some(platform.id().to_string());
                }
                "exclude_categories" => {
                    config.exclude_categories = value
                        .split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                        .collect();
                }
                _ => anyhow::bail!("Unknown config key: {}", key),
            }
            config.save()?;
            println!("  {} Set {} = {}", "✓".green(), key, value);
            Ok(())
        }
        ConfigAction::Path => {
            println!("{}", Config::config_path().display());
            Ok(())
        }
    }
}
