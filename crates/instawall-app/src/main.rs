//! Headless replay entry point.
//!
//! Usage: `instawall <script.json> [config.json]`

use instawall_app::{ReplayError, ReplayScript, run};
use instawall_core::WallConfig;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Starting InstaWall replay");

    let mut args = std::env::args().skip(1);
    let Some(script_path) = args.next() else {
        log::error!("usage: instawall <script.json> [config.json]");
        return ExitCode::from(2);
    };
    let config_path = args.next();

    match replay(&script_path, config_path.as_deref()) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Replay failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn replay(script_path: &str, config_path: Option<&str>) -> Result<String, ReplayError> {
    let script = ReplayScript::load(script_path)?;
    let config = config_path.map(WallConfig::load).transpose()?;
    run(script, config)?.to_json()
}
