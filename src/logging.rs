// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use eyre::{Result, WrapErr};
use simplelog::{
    ColorChoice, CombinedLogger, Config, LevelFilter, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use std::fs::File;

/// Level selected by repeating `-v`, falling back to the configured one.
pub fn level_for(verbosity: u8, configured: LevelFilter) -> LevelFilter {
    match verbosity {
        0 => configured,
        1 => LevelFilter::Info.max(configured),
        2 => LevelFilter::Debug.max(configured),
        _ => LevelFilter::Trace,
    }
}

/// Sends log records to stderr, keeping stdout for results, and
/// optionally to a file as well.
pub fn init(level: LevelFilter, log_file: Option<&str>) -> Result<()> {
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];
    if let Some(path) = log_file {
        let file =
            File::create(path).wrap_err_with(|| format!("Failed to create log file `{}`", path))?;
        loggers.push(WriteLogger::new(level, Config::default(), file));
    }
    CombinedLogger::init(loggers).wrap_err("Failed to initialize logging")
}
