use std::io;
use std::process::ExitCode;

use log::{error, info};

use ultimate_mcts::config::BotConfig;
use ultimate_mcts::driver::{self, TurnDriver};

fn main() -> ExitCode {
    // Default to 'info' unless RUST_LOG says otherwise. Logs go to stderr;
    // stdout carries nothing but moves.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let config = BotConfig::load_or_default();
    info!(
        "Starting bot: {}x{} boards, {} workers, {}ms per turn",
        config.board_size, config.board_size, config.search.workers, config.driver.turn_budget_ms
    );

    let mut driver = match TurnDriver::new(&config) {
        Ok(driver) => driver,
        Err(err) => {
            error!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    match driver::run(&mut driver, &mut stdin.lock(), &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
