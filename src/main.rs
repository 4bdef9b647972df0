//! Life Grid headless driver
//!
//! Loads settings, runs a fixed number of frames and logs status lines.
//! Nothing is drawn; this is the smallest driver the engine needs.

use std::process::ExitCode;

use life_grid::{FrameInput, Settings, Simulation};

const DEFAULT_FRAMES: u64 = 100;
const DEFAULT_LOG_EVERY: u64 = 10;

const USAGE: &str =
    "usage: life-grid [SETTINGS.json] [--frames N] [--log-every N] [--write-default PATH]";

struct Args {
    settings_path: Option<String>,
    frames: u64,
    log_every: u64,
    write_default: Option<String>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        settings_path: None,
        frames: DEFAULT_FRAMES,
        log_every: DEFAULT_LOG_EVERY,
        write_default: None,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| iter.next().ok_or_else(|| format!("{flag} requires a value"));
        match arg.as_str() {
            "--frames" => {
                args.frames = value("--frames")?
                    .parse()
                    .map_err(|_| "--frames requires a non-negative integer".to_string())?;
            }
            "--log-every" => {
                args.log_every = value("--log-every")?
                    .parse()
                    .map_err(|_| "--log-every requires a non-negative integer".to_string())?;
            }
            "--write-default" => args.write_default = Some(value("--write-default")?),
            "-h" | "--help" => return Err(USAGE.to_string()),
            other if other.starts_with("--") => {
                return Err(format!("unknown argument: {other}\n{USAGE}"));
            }
            path => args.settings_path = Some(path.to_string()),
        }
    }
    Ok(args)
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::from(2);
        }
    };

    if let Some(path) = args.write_default {
        return match Settings::default().save(&path) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                log::error!("{err}");
                ExitCode::FAILURE
            }
        };
    }

    let settings = args
        .settings_path
        .as_deref()
        .map(Settings::load)
        .unwrap_or_default();

    let mut sim = match Simulation::from_settings(&settings) {
        Ok(sim) => sim,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };
    log::info!("Life Grid starting: {}", sim.status());

    // Headless runs play straight through
    sim.set_paused(false);
    let input = FrameInput::default();
    for frame in 1..=args.frames {
        sim.frame(&input);
        if args.log_every > 0 && frame % args.log_every == 0 {
            log::info!("{}", sim.status());
        }
    }

    println!("{}", sim.status());
    ExitCode::SUCCESS
}
