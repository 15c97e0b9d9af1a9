use std::ffi::OsString;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{ArgMatches, CommandFactory, FromArgMatches};
use tracing::{error, info};

use crate::app::{AttackRequest, report_outcome, run_attack};
use crate::args::{AttackArgs, Command, SwarmArgs};
use crate::config::{apply_config, load_config};
use crate::error::{AppError, AppResult};
use crate::shutdown::shutdown_channel;
use crate::shutdown_handlers::setup_signal_shutdown_handler;
use crate::worker::TcpWorkerAdapter;

/// Exit status when thresholds were configured and not met.
const EXIT_REJECTED: u8 = 1;

/// Runs the `swarm` binary: exit code 0 when the attack is accepted or not
/// evaluated, 1 when it is rejected.
///
/// # Errors
///
/// Returns an error for invalid arguments or configuration, when the attack
/// does not fit the fleet, or when a report artifact cannot be written.
pub fn run() -> AppResult<ExitCode> {
    let Some((mut args, matches)) = parse_args()? else {
        return Ok(ExitCode::SUCCESS);
    };

    let config = load_config(args.config.as_deref())?;
    if let Some(config) = config.as_ref() {
        apply_config(&mut args, &matches, config)?;
    }

    crate::logger::init_logging(args.verbose);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(args))
}

fn parse_args() -> AppResult<Option<(AttackArgs, ArgMatches)>> {
    let mut cmd = SwarmArgs::command();
    let raw_args: Vec<OsString> = std::env::args_os().collect();

    if matches!(raw_args.as_slice(), [] | [_]) {
        cmd.print_help()?;
        println!();
        return Ok(None);
    }

    let matches = cmd.get_matches_from(raw_args);
    let args = SwarmArgs::from_arg_matches(&matches)?;
    match args.command {
        Command::Attack(attack) => {
            let sub_matches = matches
                .subcommand_matches("attack")
                .cloned()
                .unwrap_or_default();
            Ok(Some((attack, sub_matches)))
        }
    }
}

async fn run_async(args: AttackArgs) -> AppResult<ExitCode> {
    let request = AttackRequest::from_args(&args).map_err(|err| {
        error!("{}", err);
        AppError::from(err)
    })?;

    let (shutdown_tx, shutdown_rx) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);

    let adapter = Arc::new(TcpWorkerAdapter::new(
        request.connect_policy,
        request.connect_timeout,
    ));
    let outcome = run_attack(&request, adapter, Some(shutdown_rx)).await;

    drop(shutdown_tx.send(()));
    signal_handle.await?;

    let outcome = outcome?;
    report_outcome(&request, &outcome).await?;

    if outcome.accepted() {
        info!("Attack accepted.");
        Ok(ExitCode::SUCCESS)
    } else {
        info!("Attack rejected.");
        Ok(ExitCode::from(EXIT_REJECTED))
    }
}
