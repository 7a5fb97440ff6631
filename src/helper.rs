// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use rustyline::{
    completion::{extract_word, Completer, Pair},
    highlight::Highlighter,
    hint::Hinter,
    validate::Validator,
    Helper,
};
use rustyline::{Context as LineContext, Result};

use graphcalc_core::Function;

use crate::repl::COMMANDS;

/// Characters that end a word when completing.
const BREAK_CHARS: &[u8] = b" \t()+-*/%^,=";

const CONSTANTS: [&str; 3] = ["pi", "e", "x"];

/// Completes function names, constants and REPL commands.
#[derive(Default)]
pub struct GraphcalcHelper;

impl GraphcalcHelper {
    pub fn new() -> GraphcalcHelper {
        GraphcalcHelper
    }

    pub fn candidates(prefix: &str) -> Vec<&'static str> {
        if prefix.is_empty() {
            return vec![];
        }
        let mut words: Vec<&'static str> = Function::ALL
            .iter()
            .map(|func| func.name())
            .chain(CONSTANTS.iter().copied())
            .chain(COMMANDS.iter().copied())
            .filter(|word| word.starts_with(prefix) && *word != prefix)
            .collect();
        words.sort_unstable();
        words.dedup();
        words
    }
}

impl Completer for GraphcalcHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &LineContext) -> Result<(usize, Vec<Pair>)> {
        let (res_pos, name) = extract_word(line, pos, None, BREAK_CHARS);

        let results = GraphcalcHelper::candidates(name)
            .into_iter()
            .map(|word| Pair {
                display: word.to_owned(),
                replacement: word.to_owned(),
            })
            .collect();

        Ok((res_pos, results))
    }
}

impl Helper for GraphcalcHelper {}

impl Validator for GraphcalcHelper {}

impl Highlighter for GraphcalcHelper {}

impl Hinter for GraphcalcHelper {
    type Hint = String;
}
