// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use eyre::{eyre, Result, WrapErr};
use std::fs::File;
use std::io::{stdin, BufReader};
use std::process::ExitCode;

use graphcalc::config::{self, Config};
use graphcalc::fmt::{error_string, value_string};
use graphcalc::plot::{self, Format};
use graphcalc::{logging, repl};

fn cli() -> Command {
    Command::new("Graphcalc")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Graphcalc Contributors")
        .about("Calculator and function plotter")
        .arg(
            Arg::new("EXPR")
                .help("Evaluate a list of expressions. If no arguments are provided, an interactive session will start.")
                .num_args(..)
                .required(false),
        )
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .help("Reads expressions from a file, or stdin if given `-`"),
        )
        .arg(
            Arg::new("config-path")
                .long("config-path")
                .help("Prints a path to the config file, then exits")
                .action(ArgAction::SetTrue)
        )
        .arg(
            Arg::new("config")
                .short('c')
                .num_args(1)
                .long("config").action(ArgAction::Set).help("Set path to config.toml")
                .global(true)
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log more detail to stderr, repeat for even more")
                .action(ArgAction::Count)
                .global(true)
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Also write log records to this file")
                .action(ArgAction::Set)
                .global(true)
        )
        .subcommand(
            Command::new("plot")
                .about("Samples an expression in x across a range")
                .arg(Arg::new("EXPR").required(true).allow_hyphen_values(true))
                .arg(
                    Arg::new("min")
                        .long("min")
                        .required(true)
                        .allow_hyphen_values(true)
                        .help("Lowest x, may be an expression such as -2*pi"),
                )
                .arg(
                    Arg::new("max")
                        .long("max")
                        .required(true)
                        .allow_hyphen_values(true)
                        .help("Highest x, may be an expression"),
                )
                .arg(
                    Arg::new("points")
                        .long("points")
                        .value_parser(value_parser!(usize))
                        .help("Number of steps across the range [default: from config]"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .value_parser(Format::NAMES)
                        .default_value("text"),
                ),
        )
}

fn run_plot(matches: &ArgMatches, config: &Config) -> Result<ExitCode> {
    let arg = |name: &str| {
        matches
            .get_one::<String>(name)
            .map(|s| &s[..])
            .ok_or_else(|| eyre!("Missing argument `{}`", name))
    };
    let points = matches
        .get_one::<usize>("points")
        .copied()
        .unwrap_or(config.plot.points);
    let format = Format::from_name(arg("format")?).unwrap_or(Format::Text);

    let samples = plot::sample_expression(arg("EXPR")?, arg("min")?, arg("max")?, points)?;
    let output = plot::render(
        &samples,
        format,
        config.plot.width,
        config.plot.height,
        &config.get_theme(),
    )?;
    print!("{}", output);
    if !output.ends_with('\n') {
        println!();
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> Result<ExitCode> {
    let matches = cli().get_matches();

    color_eyre::install()?;
    let config = config::read_config(matches.get_one::<String>("config").map(|s| &**s))?;

    let verbosity = matches.get_count("verbose");
    logging::init(
        logging::level_for(verbosity, config.log_level()?),
        matches.get_one::<String>("log-file").map(|s| &**s),
    )?;

    if matches.get_flag("config-path") {
        println!("{}", config::config_path("config.toml")?.display());
        Ok(ExitCode::SUCCESS)
    } else if let Some(("plot", plot_matches)) = matches.subcommand() {
        run_plot(plot_matches, &config)
    } else if let Some(filename) = matches.get_one::<String>("file") {
        match &filename[..] {
            "-" => {
                let stdin_handle = stdin();
                repl::noninteractive(stdin_handle.lock(), &config, false).map(|_| ExitCode::SUCCESS)
            }
            _ => {
                let file = File::open(&filename)
                    .wrap_err(format!("Failed to open input file `{}`", filename))?;
                repl::noninteractive(BufReader::new(file), &config, false)
                    .map(|_| ExitCode::SUCCESS)
            }
        }
    } else if let Some(exprs) = matches.get_many::<String>("EXPR") {
        let theme = config.get_theme();
        let mut exit_code = ExitCode::SUCCESS;
        for expr in exprs {
            println!("> {}", expr);
            match graphcalc_core::parse(expr) {
                Ok(equation) => println!("{}", value_string(&config, &theme, equation.evaluate())),
                Err(e) => {
                    println!("{}", error_string(&theme, &e));
                    exit_code = ExitCode::FAILURE;
                }
            }
        }
        Ok(exit_code)
    } else {
        repl::interactive(config).map(|_| ExitCode::SUCCESS)
    }
}
