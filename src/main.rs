use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::info;

use pin_updates::config::{self, Config};
use pin_updates::parser::settings::load_merged_specs;
use pin_updates::report::{Notice, NoticeLevel, auto_notice, interactive_notice};
use pin_updates::version::cache::{
    JsonFileStore, current_timestamp_ms, mark_auto_check, should_run_auto_check,
};
use pin_updates::version::checker::UpdateChecker;
use pin_updates::version::registries::{GitCli, NpmRegistry};

#[derive(Parser)]
#[command(name = "pin-updates")]
#[command(version, about = "Check pinned npm and git packages for upstream updates")]
struct Cli {
    /// User-global settings file
    #[arg(long, global = true)]
    global: Option<PathBuf>,

    /// Project settings file
    #[arg(long, global = true)]
    project: Option<PathBuf>,

    /// File holding the last automatic check timestamp
    #[arg(long, global = true)]
    cache: Option<PathBuf>,

    /// Print the raw result as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check now and report every outcome
    Check,
    /// Check only if the automatic check interval elapsed; report updates only
    Auto,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = pin_updates::logging::init(&config::log_path(), cli.verbose)
        .inspect_err(|e| eprintln!("pin-updates: logging disabled: {e}"))
        .ok();

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli))
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let app_config = Config::load(&config::config_path());
    let cwd = std::env::current_dir()?;

    let global_path = cli.global.unwrap_or_else(config::global_settings_path);
    let project_path = cli
        .project
        .unwrap_or_else(|| config::project_settings_path(&cwd));
    let cache_path = cli.cache.unwrap_or_else(config::auto_check_cache_path);
    let store = JsonFileStore::new(&cache_path);

    let now = current_timestamp_ms();
    if matches!(cli.command, Command::Auto)
        && !should_run_auto_check(&store, now, app_config.auto_check.interval_ms)
    {
        return Ok(());
    }
    mark_auto_check(&store, now);

    info!(
        "Loading settings from {:?} and {:?}",
        global_path, project_path
    );
    let specs = load_merged_specs(&global_path, &project_path).await;

    let checker = UpdateChecker::new(
        Arc::new(NpmRegistry::new(
            &app_config.registry.npm_base_url,
            Duration::from_millis(app_config.timeouts.npm_ms),
        )),
        Arc::new(GitCli::new(Duration::from_millis(app_config.timeouts.git_ms))),
    );
    let result = checker.check_updates(&specs).await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    match cli.command {
        Command::Check => print_notice(&interactive_notice(&result)),
        Command::Auto => {
            if let Some(notice) = auto_notice(&result) {
                print_notice(&notice);
            }
        }
    }

    Ok(())
}

fn print_notice(notice: &Notice) {
    match notice.level {
        NoticeLevel::Info => println!("{}", notice.message),
        NoticeLevel::Warning => println!("warning: {}", notice.message),
    }
}
