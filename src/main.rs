// SPDX-License-Identifier: MPL-2.0
use gesture_reader::app::{self, Flags};
use simplelog::{Config, LevelFilter, SimpleLogger, WriteLogger};
use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

const HELP: &str = "\
Replays a recorded gesture trace through the document viewer.

USAGE:
  gesture_reader [OPTIONS] <TRACE>

OPTIONS:
  --lang <LANG>          Locale (en-US, fr)
  --config-dir <DIR>     Directory holding settings.toml
  --data-dir <DIR>       Directory holding state.cbor
  --log-level <LEVEL>    off, error, warn, info, debug, trace [default: warn]
  --log-file <FILE>      Write the log to FILE instead of stderr
  -h, --help             Print this help
";

struct Args {
    flags: Flags,
    log_level: LevelFilter,
    log_file: Option<PathBuf>,
}

fn parse_args() -> Result<Option<Args>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let lang = args.opt_value_from_str("--lang")?;
    let config_dir = args.opt_value_from_str("--config-dir")?;
    let data_dir = args.opt_value_from_str("--data-dir")?;
    let log_level = args
        .opt_value_from_str("--log-level")?
        .unwrap_or(LevelFilter::Warn);
    let log_file = args.opt_value_from_str("--log-file")?;
    let trace = args
        .finish()
        .into_iter()
        .next()
        .map(PathBuf::from);

    Ok(Some(Args {
        flags: Flags {
            lang,
            data_dir,
            config_dir,
            trace,
        },
        log_level,
        log_file,
    }))
}

fn init_logging(level: LevelFilter, log_file: Option<&PathBuf>) -> Result<(), String> {
    match log_file {
        Some(path) => {
            let file = File::create(path).map_err(|err| format!("{}: {err}", path.display()))?;
            WriteLogger::init(level, Config::default(), file).map_err(|err| err.to_string())
        }
        None => SimpleLogger::init(level, Config::default()).map_err(|err| err.to_string()),
    }
}

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            print!("{HELP}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            return ExitCode::from(2);
        }
    };

    if let Err(err) = init_logging(args.log_level, args.log_file.as_ref()) {
        eprintln!("error: cannot initialize logging: {err}");
        return ExitCode::FAILURE;
    }

    match app::run(args.flags) {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
