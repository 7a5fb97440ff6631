// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use strsim::jaro_winkler;

use crate::term::Function;

/// Words other than function names that the scanner recognizes.
const CONSTANT_WORDS: [&str; 3] = ["pi", "e", "x"];

/// Minimum score for a candidate to be offered as a correction.
const THRESHOLD: i32 = 850;

#[derive(PartialEq, Eq, Debug, Clone)]
struct Candidate {
    score: i32,
    word: &'static str,
}

// Reversed so the heap's top is the weakest candidate.
impl Ord for Candidate {
    fn cmp(&self, other: &Candidate) -> Ordering {
        Reverse(self.score).cmp(&Reverse(other.score))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Candidate) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Ranks the known words against `query` and returns the best match, if
/// it is close enough to be worth suggesting.
pub(crate) fn suggest(query: &str) -> Option<&'static str> {
    let query = query.to_lowercase();
    let mut results = BinaryHeap::new();

    for word in Function::ALL
        .iter()
        .map(|func| func.name())
        .chain(CONSTANT_WORDS.iter().copied())
    {
        let modifier = if word == query {
            4_000
        } else if word.len() > 1 && query.starts_with(word) {
            1_000
        } else {
            0
        };
        let score = jaro_winkler(word, &query);
        results.push(Candidate {
            score: (score * 1000.0) as i32 + modifier,
            word,
        });
        while results.len() > 1 {
            results.pop();
        }
    }

    results
        .pop()
        .filter(|candidate| candidate.score > THRESHOLD)
        .map(|candidate| candidate.word)
}

#[cfg(test)]
mod test {
    use super::suggest;

    #[test]
    fn close_names() {
        assert_eq!(suggest("sine"), Some("sin"));
        assert_eq!(suggest("SQRT"), Some("sqrt"));
        assert_eq!(suggest("atn"), Some("atan"));
    }

    #[test]
    fn unrelated_words() {
        assert_eq!(suggest("data"), None);
        assert_eq!(suggest("qwerty"), None);
    }
}
