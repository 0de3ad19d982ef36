mod cli;
mod error_fmt;
mod logging;
mod run;
mod signals;

use clap::Parser;
use cli::{Cli, Commands, JSON_MODE, SetArgs};
use error_fmt::{exit_code_for_error, format_error_json, humanize};
use servo_core::error::ServoError;

fn main() {
    let _ = color_eyre::install();
    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);

    if let Err(err) = execute(cli) {
        tracing::error!(error = %err, "servo failed");
        // exit() skips destructors; flush the file sink first
        logging::flush();
        if JSON_MODE.get().copied().unwrap_or(false) {
            eprintln!("{}", format_error_json(&err));
        } else {
            eprintln!("{}", humanize(&err));
        }
        std::process::exit(exit_code_for_error(&err));
    }
    logging::flush();
}

fn execute(cli: Cli) -> eyre::Result<()> {
    let mut cfg = run::load_config(cli.config.as_deref())?;

    let overrides = match &cli.cmd {
        Commands::Set(args) => args.clone(),
        Commands::SelfCheck { num } => SetArgs {
            num: *num,
            ..SetArgs::default()
        },
    };
    run::apply_overrides(&mut cfg, &overrides);
    run::validate(&cfg)?;

    let level = logging::effective_level(cli.log_level.as_deref(), cfg.logging.level.as_deref());
    logging::init(cli.json, level, &cfg.logging)
        .map_err(|e| ServoError::Config(format!("{e:#}")))?;
    tracing::debug!(?cfg, "effective configuration");

    match cli.cmd {
        Commands::Set(_) => {
            run::run_set(&cfg)?;
        }
        Commands::SelfCheck { .. } => {
            run::self_check(&cfg)?;
            println!("self-check ok");
        }
    }
    Ok(())
}
