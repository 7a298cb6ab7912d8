//! Generator words over the rank-4 alphabet
//!
//! A group element is written as a product of the four mirror reflections,
//! so a word is just a sequence of letters in `0..RANK`. Rings reuse the
//! same representation for cyclic sequences of coset indices.

use std::fmt;

/// Number of generating reflections (rank of the Coxeter system)
pub const RANK: usize = 4;

/// A product of generators, letter indices in `[0, RANK)`
pub type Word = Vec<usize>;

/// An ordered cyclic sequence of coset indices forming one face
pub type Ring = Vec<usize>;

/// Decode a packed decimal into a word, least significant digit first.
///
/// Digits are 1-based: `234` becomes `[3, 2, 1]`. This is the convention
/// used by the preset selection codes, where a zero digit means "unused"
/// and never reaches this function.
pub fn word_from_digits(mut g: u32) -> Word {
    let mut result = Word::new();
    while g > 0 {
        let d = (g % 10) as usize;
        assert!(d > 0, "word digits are 1-based, got 0 in {}", g);
        result.push(d - 1);
        g /= 10;
    }
    result
}

/// Parse a word from a string of letter digits, e.g. `"012"` -> `[0, 1, 2]`.
pub fn word_from_str(s: &str) -> Result<Word, WordError> {
    let mut result = Word::with_capacity(s.len());
    for c in s.chars() {
        let letter = c
            .to_digit(10)
            .map(|d| d as usize)
            .filter(|&d| d < RANK)
            .ok_or(WordError::InvalidLetter(c))?;
        result.push(letter);
    }
    Ok(result)
}

/// Abort on any letter outside `[0, RANK)`.
///
/// Out-of-range letters indicate a malformed static configuration, not a
/// recoverable condition, so this is an assertion rather than a `Result`.
pub fn assert_letters_in_range(kind: &str, words: &[Word]) {
    for (w, word) in words.iter().enumerate() {
        for (t, &j) in word.iter().enumerate() {
            assert!(
                j < RANK,
                "generator out of range: letter {}[{}][{}] = {}",
                kind,
                w,
                t,
                j
            );
        }
    }
}

/// Error parsing a word from user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordError {
    /// Character is not a generator letter in `0..RANK`
    InvalidLetter(char),
}

impl fmt::Display for WordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WordError::InvalidLetter(c) => {
                write!(f, "invalid generator letter '{}' (expected 0..{})", c, RANK - 1)
            }
        }
    }
}

impl std::error::Error for WordError {}
