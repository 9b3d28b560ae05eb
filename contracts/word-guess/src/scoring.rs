//! Guess scoring.
//!
//! Each guessed byte is scored independently:
//! - `+` (HIT): same letter at the same position.
//! - `*` (PRESENT): letter occurs anywhere in the secret.
//! - `-` (ABSENT): letter does not occur in the secret.
//!
//! Unlike standard Wordle, PRESENT does not consume secret letters: a
//! repeated guess letter is marked PRESENT at every position where it is
//! not a HIT, as long as the secret contains it at all.

use crate::{Error, MAX_WORD_LEN};

/// Feedback for a single guessed letter.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mark {
    Hit,
    Present,
    Absent,
}

impl Mark {
    pub const fn symbol(self) -> char {
        match self {
            Mark::Hit => '+',
            Mark::Present => '*',
            Mark::Absent => '-',
        }
    }
}

/// Per-position marks for one guess.
#[derive(Clone, Debug)]
pub struct Feedback {
    marks: [Mark; MAX_WORD_LEN],
    len: usize,
}

impl Feedback {
    pub fn marks(&self) -> &[Mark] {
        &self.marks[..self.len]
    }
}

/// Score `guess` against `secret`.
///
/// Both words must have the same byte length. Words longer than
/// `MAX_WORD_LEN` never reach this point: the dictionary rejects them and
/// a guess must match the secret's length.
pub fn score_guess(secret: &[u8], guess: &[u8]) -> Result<Feedback, Error> {
    if secret.len() != guess.len() || secret.len() > MAX_WORD_LEN {
        return Err(Error::GuessLengthMismatch);
    }

    let mut feedback = Feedback {
        marks: [Mark::Absent; MAX_WORD_LEN],
        len: secret.len(),
    };

    for ((mark, &g), &s) in feedback.marks.iter_mut().zip(guess).zip(secret) {
        *mark = if g == s {
            Mark::Hit
        } else if secret.contains(&g) {
            Mark::Present
        } else {
            Mark::Absent
        };
    }

    Ok(feedback)
}

#[cfg(test)]
mod test {
    use super::*;

    fn symbols(secret: &str, guess: &str) -> [char; 8] {
        let feedback = score_guess(secret.as_bytes(), guess.as_bytes()).unwrap();
        let mut out = [' '; 8];
        for (slot, mark) in out.iter_mut().zip(feedback.marks()) {
            *slot = mark.symbol();
        }
        out
    }

    #[test]
    fn test_identical_words_are_all_hits() {
        let feedback = score_guess(b"crane", b"crane").unwrap();
        assert_eq!(feedback.marks().len(), 5);
        assert!(feedback.marks().iter().all(|m| *m == Mark::Hit));
    }

    #[test]
    fn test_disjoint_words_are_all_absent() {
        let feedback = score_guess(b"abc", b"xyz").unwrap();
        assert!(feedback.marks().iter().all(|m| *m == Mark::Absent));
    }

    #[test]
    fn test_mixed_marks() {
        // secret: DOG, guess: GOD -> G present, O hit, D present
        assert_eq!(&symbols("dog", "god")[..3], &['*', '+', '*']);
    }

    #[test]
    fn test_repeated_letters_are_not_consumed() {
        // Only one G in the secret, yet every non-hit G is marked present.
        assert_eq!(&symbols("dog", "ggg")[..3], &['*', '*', '+']);
        // SPEED / EERIE: both E's at 0 and 1 are present, and so is the last.
        assert_eq!(&symbols("speed", "eerie")[..5], &['*', '*', '-', '-', '*']);
    }

    #[test]
    fn test_scoring_is_case_sensitive() {
        assert_eq!(&symbols("dog", "DOG")[..3], &['-', '-', '-']);
    }

    #[test]
    fn test_length_mismatch_rejected() {
        assert_eq!(
            score_guess(b"dog", b"dogs").unwrap_err(),
            Error::GuessLengthMismatch
        );
        assert_eq!(score_guess(b"dog", b"").unwrap_err(), Error::GuessLengthMismatch);
    }
}
