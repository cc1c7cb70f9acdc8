mod cli;

use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use crossbeam_channel::{bounded, select};

use padmouse_control::Performer;
use padmouse_gamepad::{EvdevController, Session};
use padmoused::app::Padmouse;
use padmoused::runner::ActionRunner;
use padmoused::{config, logging, print_error, print_info, print_warning, Error};

use crate::cli::{Cli, Command};

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = logging::setup(cli.verbose, cli.no_color) {
        eprintln!("failed to set up logger: {e}");
        return ExitCode::FAILURE;
    }

    let result = match cli.command {
        Command::Run {
            controller,
            profile,
        } => run(controller.as_deref(), profile.as_deref()),
        Command::List => list(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(controller: Option<&Path>, profile: Option<&Path>) -> Result<(), Error> {
    let config = config::load(profile)?;

    let device = match controller {
        Some(path) => EvdevController::open(path)?,
        None => EvdevController::open_first()?,
    };
    let mut session = Session::new(device)?;
    let info = session.info();
    print_info!(
        "using controller - {0} path={1} vid=0x{2:04x} pid=0x{3:04x}",
        info.name,
        info.path.display(),
        info.vendor_id,
        info.product_id
    );
    session.rumble(Instant::now())?;

    let mut performer = Performer::new()?;

    // Handle Ctrl+C to exit cleanly
    let (stop_tx, stop_rx) = bounded::<()>(1);
    ctrlc::set_handler(move || {
        let _ = stop_tx.try_send(());
    })?;

    let ticker = crossbeam_channel::tick(config.tick);
    let mut app = Padmouse::new(config);
    print_info!("padmoused started. Press the grab toggle to release the controller.");

    let mut result = Ok(());
    loop {
        select! {
            recv(stop_rx) -> _ => {
                print_info!("quitting...");
                break;
            }
            recv(ticker) -> _ => {
                let mut runner = ActionRunner::new(&mut performer);
                if let Err(e) = app.tick(&mut session, Instant::now(), |action| runner.run(action)) {
                    result = Err(e);
                    break;
                }
            }
        }
    }

    let mut runner = ActionRunner::new(&mut performer);
    if let Err(e) = app.release_all(|action| runner.run(action)) {
        print_warning!("failed to release held input: {e}");
    }
    result
}

fn list() -> Result<(), Error> {
    let controllers = EvdevController::list()?;
    if controllers.is_empty() {
        print_info!("no controllers found");
    }
    for info in controllers {
        println!(
            "{}\t{} (vid=0x{:04x} pid=0x{:04x})",
            info.path.display(),
            info.name,
            info.vendor_id,
            info.product_id
        );
    }
    Ok(())
}
