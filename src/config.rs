// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::style_ser;
use ansi_term::{Color, Style};
use color_eyre::Result;
use eyre::{eyre, WrapErr};
use graphcalc_core::{DEFAULT_DIGITS, DEFAULT_POINTS};
use log::LevelFilter;
use serde_derive::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs::read_to_string;
use std::io::ErrorKind;
use std::path::PathBuf;

pub fn config_path(name: &str) -> Result<PathBuf> {
    let mut path = dirs::config_dir().ok_or_else(|| eyre!("Could not find config directory"))?;
    path.push("graphcalc");
    path.push(name);
    Ok(path)
}

pub fn history_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|mut path| {
        path.push("graphcalc");
        path.push("history.txt");
        path
    })
}

#[derive(Serialize, Deserialize, Clone, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub graphcalc: Graphcalc,
    pub plot: Plot,
    pub colors: Colors,
    pub themes: HashMap<String, Theme>,
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct Graphcalc {
    /// Which prompt to render when run interactively.
    pub prompt: String,
    /// Significant digits shown for results.
    pub digits: usize,
    /// How many results the `history` command keeps.
    pub history_size: usize,
    /// Log level used when `-v` is not given: off, error, warn, info,
    /// debug or trace.
    pub log_level: String,
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct Plot {
    /// Steps taken across the x range.
    pub points: usize,
    /// Size of the text chart, in characters.
    pub width: usize,
    pub height: usize,
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct Colors {
    /// Whether support for colored output should be enabled.
    pub enabled: Option<bool>,
    /// The name of the current theme.
    pub theme: String,
}

#[derive(Serialize, Deserialize, Default, Clone, Copy, Debug, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Theme {
    #[serde(with = "style_ser")]
    pub plain: Style,
    #[serde(with = "style_ser")]
    pub error: Style,
    #[serde(with = "style_ser")]
    pub number: Style,
    #[serde(with = "style_ser")]
    pub user_input: Style,
    #[serde(with = "style_ser")]
    pub label: Style,
    #[serde(with = "style_ser")]
    pub axis: Style,
    #[serde(with = "style_ser")]
    pub curve: Style,
}

impl Theme {
    /// Used when colors are enabled and no theme of the configured name
    /// exists.
    pub fn builtin() -> Theme {
        Theme {
            plain: Style::default(),
            error: Style::new().fg(Color::Red),
            number: Style::default(),
            user_input: Style::new().bold(),
            label: Style::new().fg(Color::Cyan),
            axis: Style::new().dimmed(),
            curve: Style::new().fg(Color::Green),
        }
    }
}

impl Default for Graphcalc {
    fn default() -> Self {
        Graphcalc {
            prompt: "> ".to_owned(),
            digits: DEFAULT_DIGITS,
            history_size: 10,
            log_level: "warn".to_owned(),
        }
    }
}

impl Default for Plot {
    fn default() -> Self {
        Plot {
            points: DEFAULT_POINTS,
            width: 72,
            height: 20,
        }
    }
}

impl Default for Colors {
    fn default() -> Self {
        Colors {
            enabled: None,
            theme: "default".to_owned(),
        }
    }
}

impl Config {
    pub fn get_theme(&self) -> Theme {
        let default_enable_colors = env::var("NO_COLOR") == Err(env::VarError::NotPresent);
        let colors_enabled = self.colors.enabled.unwrap_or(default_enable_colors);

        if colors_enabled {
            self.themes
                .get(&self.colors.theme)
                .copied()
                .unwrap_or_else(Theme::builtin)
        } else {
            Theme::default()
        }
    }

    pub fn log_level(&self) -> Result<LevelFilter> {
        self.graphcalc
            .log_level
            .parse()
            .map_err(|_| {
                eyre!(
                    "Unknown log level `{}` in [graphcalc] log_level",
                    self.graphcalc.log_level
                )
            })
    }
}

pub fn read_config(override_path: Option<&str>) -> Result<Config> {
    let path = if let Some(path) = override_path {
        PathBuf::from(path)
    } else {
        config_path("config.toml")?
    };
    match read_to_string(path) {
        // Hard fail if the file has invalid TOML.
        Ok(result) => toml::from_str(&result).wrap_err("While parsing config.toml"),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            if let Some(override_path) = override_path {
                // Hard fail if user-provided config path doesn't exist
                Err(eyre!(err).wrap_err(format!(
                    "Failed to read provided config file `{}`",
                    override_path
                )))
            } else {
                // Use default config if it doesn't exist.
                Ok(Config::default())
            }
        }
        // Hard fail for other IO errors (e.g. permissions).
        Err(err) => Err(eyre!(err).wrap_err("Failed to read config.toml")),
    }
}
