// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Serde helpers for writing terminal styles in config.toml as plain
//! words, such as `"bold red on black"` or `"underline #ff8800"`.

use ansi_term::{Color, Style};
use serde::{
    de::{Error, Unexpected},
    Deserialize, Deserializer, Serializer,
};

const NAMED_COLORS: [(&str, Color); 8] = [
    ("black", Color::Black),
    ("red", Color::Red),
    ("green", Color::Green),
    ("yellow", Color::Yellow),
    ("blue", Color::Blue),
    ("purple", Color::Purple),
    ("cyan", Color::Cyan),
    ("white", Color::White),
];

type Attribute = fn(&Style) -> Style;

const ATTRIBUTES: [(&str, Attribute); 8] = [
    ("bold", Style::bold),
    ("italic", Style::italic),
    ("dimmed", Style::dimmed),
    ("underline", Style::underline),
    ("blink", Style::blink),
    ("reverse", Style::reverse),
    ("strikethrough", Style::strikethrough),
    ("hidden", Style::hidden),
];

fn canonical_word(word: &str) -> &str {
    match word {
        "magenta" => "purple",
        "dim" => "dimmed",
        "under" => "underline",
        "strike" => "strikethrough",
        "none" => "hidden",
        word => word,
    }
}

/// `rgb(r, g, b)` with decimal components.
fn rgb_triple(body: &str) -> Option<Color> {
    let parts = body
        .split(',')
        .map(|part| part.trim().parse::<u8>().ok())
        .collect::<Option<Vec<u8>>>()?;
    match parts[..] {
        [r, g, b] => Some(Color::RGB(r, g, b)),
        _ => None,
    }
}

/// `#rrggbb`.
fn hex_triple(digits: &str) -> Option<Color> {
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |at: usize| u8::from_str_radix(&digits[at..at + 2], 16).ok();
    Some(Color::RGB(channel(0)?, channel(2)?, channel(4)?))
}

fn parse_color(word: &str) -> Option<Color> {
    let word = canonical_word(word);
    if let Some((_, color)) = NAMED_COLORS.iter().find(|(name, _)| *name == word) {
        return Some(*color);
    }
    if let Ok(index) = word.parse::<u8>() {
        return Some(Color::Fixed(index));
    }
    if let Some(digits) = word.strip_prefix('#') {
        return hex_triple(digits);
    }
    word.strip_prefix("rgb(")
        .and_then(|rest| rest.strip_suffix(')'))
        .and_then(rgb_triple)
}

/// Reads a style description, returning the first word it does not
/// understand on failure.
pub fn parse_style(text: &str) -> Result<Style, &str> {
    let mut style = Style::new();
    let mut background = false;
    for word in text.split_whitespace() {
        let name = canonical_word(word);
        if let Some((_, apply)) = ATTRIBUTES.iter().find(|(attr, _)| *attr == name) {
            style = apply(&style);
        } else if name == "on" {
            background = true;
        } else if name == "plain" || name == "default" {
            continue;
        } else {
            let color = parse_color(word).ok_or(word)?;
            style = if background {
                style.on(color)
            } else {
                style.fg(color)
            };
        }
    }
    Ok(style)
}

pub fn deserialize<'de, D>(des: D) -> Result<Style, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(des)?;
    parse_style(&text)
        .map_err(|word| D::Error::invalid_value(Unexpected::Str(word), &"a style or color word"))
}

fn color_word(color: Color) -> String {
    match color {
        Color::Fixed(index) => index.to_string(),
        Color::RGB(r, g, b) => format!("#{:02x}{:02x}{:02x}", r, g, b),
        named => NAMED_COLORS
            .iter()
            .find(|(_, candidate)| *candidate == named)
            .map_or_else(String::new, |(name, _)| (*name).to_owned()),
    }
}

/// Writes a style back out in the words [`parse_style`] reads.
pub fn style_words(style: &Style) -> String {
    let flags = [
        style.is_bold,
        style.is_italic,
        style.is_dimmed,
        style.is_underline,
        style.is_blink,
        style.is_reverse,
        style.is_strikethrough,
        style.is_hidden,
    ];
    let mut words: Vec<String> = ATTRIBUTES
        .iter()
        .zip(flags.iter())
        .filter(|(_, set)| **set)
        .map(|((name, _), _)| (*name).to_owned())
        .collect();
    words.extend(style.foreground.map(color_word));
    if let Some(background) = style.background {
        words.push("on".to_owned());
        words.push(color_word(background));
    }
    if words.is_empty() {
        "plain".to_owned()
    } else {
        words.join(" ")
    }
}

pub fn serialize<S>(style: &Style, ser: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    ser.serialize_str(&style_words(style))
}
