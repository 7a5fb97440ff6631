// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::config::{history_path, Config, Theme};
use crate::fmt::{entry_string, error_string, outcome_string};
use crate::helper::GraphcalcHelper;
use crate::history::{Entry, History, Outcome};
use crate::plot::{render_text, sample_expression};
use eyre::Result;
use log::debug;
use rustyline::{config::Configurer, error::ReadlineError, CompletionType, Editor};
use std::io::{BufRead, ErrorKind};

pub const HELP_TEXT: &str = "Type an expression in x to evaluate it with x = 0, for example `2*sin(pi/4)`.
Functions: ln sqrt sin cos tan asin acos atan sinh cosh tanh. Constants: pi e.
Commands:
  plot <expr> from <min> to <max>   draw the expression between two x values
  history                           show recent results
  clear                             forget recent results
  help                              show this text
To quit, type `quit` or press Ctrl+D.";

/// Words with a meaning of their own at the prompt.
pub const COMMANDS: [&str; 6] = ["help", "history", "clear", "plot", "quit", "exit"];

#[derive(Debug, PartialEq)]
pub enum Command<'a> {
    Help,
    Quit,
    History,
    Clear,
    Plot {
        expr: &'a str,
        min: &'a str,
        max: &'a str,
    },
    Eval(&'a str),
}

impl<'a> Command<'a> {
    pub fn parse(line: &'a str) -> Result<Command<'a>, &'static str> {
        let line = line.trim();
        match line {
            "help" => return Ok(Command::Help),
            "quit" | "exit" | ":q" => return Ok(Command::Quit),
            "history" => return Ok(Command::History),
            "clear" => return Ok(Command::Clear),
            _ => (),
        }
        let rest = match line.strip_prefix("plot") {
            Some(rest) if rest.starts_with(char::is_whitespace) => rest,
            _ => return Ok(Command::Eval(line)),
        };
        let usage = "Usage: plot <expr> from <min> to <max>";
        let (expr, range) = rest.rsplit_once(" from ").ok_or(usage)?;
        let (min, max) = range.rsplit_once(" to ").ok_or(usage)?;
        let (expr, min, max) = (expr.trim(), min.trim(), max.trim());
        if expr.is_empty() || min.is_empty() || max.is_empty() {
            return Err(usage);
        }
        Ok(Command::Plot { expr, min, max })
    }
}

/// State shared by every line of one run: the settings and the recent
/// results.
pub struct Session {
    config: Config,
    theme: Theme,
    history: History,
}

impl Session {
    pub fn new(config: Config) -> Session {
        let theme = config.get_theme();
        let history = History::new(config.graphcalc.history_size);
        Session {
            config,
            theme,
            history,
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Runs one line and returns what should be printed for it, or
    /// `None` when the line asks to quit.
    pub fn execute(&mut self, line: &str) -> Option<String> {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(usage) => return Some(error_string(&self.theme, &usage)),
        };
        debug!("executing {:?}", command);
        let output = match command {
            Command::Quit => return None,
            Command::Help => HELP_TEXT.to_owned(),
            Command::Clear => {
                self.history.clear();
                String::new()
            }
            Command::History => self
                .history
                .iter()
                .map(|entry| entry_string(&self.config, &self.theme, entry))
                .collect::<Vec<_>>()
                .join("\n"),
            Command::Plot { expr, min, max } => self.plot(expr, min, max),
            Command::Eval(expr) => {
                let entry = Entry::evaluate(expr);
                let output = outcome_string(&self.config, &self.theme, &entry.outcome);
                self.history.push(entry);
                output
            }
        };
        Some(output)
    }

    fn plot(&mut self, expr: &str, min: &str, max: &str) -> String {
        let plot = &self.config.plot;
        let result = sample_expression(expr, min, max, plot.points)
            .and_then(|samples| render_text(&samples, plot.width, plot.height, &self.theme));
        match result {
            Ok(chart) => {
                self.history.push(Entry {
                    expression: expr.to_owned(),
                    outcome: Outcome::Plotted,
                });
                chart.trim_end().to_owned()
            }
            Err(err) => error_string(&self.theme, &format!("{:#}", err)),
        }
    }
}

pub fn noninteractive<T: BufRead>(mut f: T, config: &Config, show_prompt: bool) -> Result<()> {
    use std::io::{stdout, Write};

    let mut session = Session::new(config.clone());
    let mut line = String::new();
    loop {
        if show_prompt {
            print!("{}", config.graphcalc.prompt);
        }
        stdout().flush()?;
        line.clear();
        match f.read_line(&mut line) {
            Ok(0) | Err(_) => return Ok(()),
            Ok(_) => (),
        }
        if line.trim().is_empty() {
            continue;
        }
        match session.execute(&line) {
            Some(output) if output.is_empty() => (),
            Some(output) => println!("{}", output),
            None => return Ok(()),
        }
    }
}

pub fn interactive(config: Config) -> Result<()> {
    let mut session = Session::new(config.clone());
    let mut rl = Editor::<GraphcalcHelper>::new();
    rl.set_helper(Some(GraphcalcHelper::new()));
    rl.set_completion_type(CompletionType::List);

    let hpath = history_path();
    if let Some(ref path) = hpath {
        match rl.load_history(path) {
            // Ignore file not found errors.
            Err(ReadlineError::Io(ref err)) if err.kind() == ErrorKind::NotFound => (),
            Err(err) => eprintln!("Loading history failed: {}", err),
            Ok(()) => (),
        };
    }

    let save_history = |rl: &mut Editor<GraphcalcHelper>| {
        if let Some(ref path) = hpath {
            if let Some(parent) = path.parent() {
                // ignore error - if this fails, the next line will as well.
                let _ = std::fs::create_dir_all(parent);
            }
            rl.save_history(path).unwrap_or_else(|e| {
                eprintln!("Saving history failed: {}", e);
            });
        }
    };

    loop {
        let readline = rl.readline(&config.graphcalc.prompt);
        match readline {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                rl.add_history_entry(&line);
                match session.execute(&line) {
                    Some(output) if output.is_empty() => (),
                    Some(output) => println!("{}", output),
                    None => {
                        save_history(&mut rl);
                        break;
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {}
            Err(ReadlineError::Eof) => {
                save_history(&mut rl);
                break;
            }
            Err(err) => {
                println!("{:?}", eyre::eyre!(err).wrap_err("Readline"));
                break;
            }
        }
    }

    Ok(())
}
