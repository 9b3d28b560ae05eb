//! Word source for secret selection.
//!
//! A deployment either supplies its own word list through the constructor
//! or falls back to the built-in `WORDS`. Both are non-empty by
//! construction, so the length bounds are always defined.

use soroban_sdk::{Env, String, Vec};

use crate::{DataKey, Error, MAX_WORD_LEN, MAX_WORD_LIST_LEN};

/// Built-in dictionary, lowercase ASCII.
pub const WORDS: &[&str] = &[
    // 3
    "ant", "bee", "cat", "dog", "elk", "fox", "hen", "owl", "pig", "yak",
    // 4
    "bark", "cold", "dusk", "fern", "gold", "harp", "lamp", "moss", "rain", "wolf",
    // 5
    "apple", "brick", "crane", "flame", "grape", "house", "plant", "river", "stone", "tiger",
    // 6
    "anchor", "bridge", "candle", "forest", "garden", "island", "marble", "pepper", "silver",
    "window",
    // 7
    "balloon", "blanket", "cabinet", "diamond", "feather", "harvest", "lantern", "mineral",
    "passage", "thunder",
    // 8
    "airplane", "building", "calendar", "dinosaur", "elephant", "hospital", "mountain",
    "notebook", "sandwich", "treasure",
];

/// Inclusive range of word lengths a dictionary can serve.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LengthBounds {
    pub min: u32,
    pub max: u32,
}

impl LengthBounds {
    pub fn contains(&self, len: u32) -> bool {
        (self.min..=self.max).contains(&len)
    }

    fn widen(self, len: u32) -> Self {
        Self {
            min: self.min.min(len),
            max: self.max.max(len),
        }
    }

    const EMPTY: Self = Self {
        min: u32::MAX,
        max: 0,
    };
}

pub enum Dictionary {
    Builtin,
    Custom(Vec<String>),
}

impl Dictionary {
    /// Load the dictionary configured for this deployment.
    pub fn load(env: &Env) -> Self {
        match env.storage().instance().get(&DataKey::WordList) {
            Some(words) => Dictionary::Custom(words),
            None => Dictionary::Builtin,
        }
    }

    pub fn bounds(&self) -> LengthBounds {
        match self {
            Dictionary::Builtin => WORDS
                .iter()
                .fold(LengthBounds::EMPTY, |b, w| b.widen(w.len() as u32)),
            Dictionary::Custom(words) => words
                .iter()
                .fold(LengthBounds::EMPTY, |b, w| b.widen(w.len())),
        }
    }

    /// Number of words of exactly `len` letters.
    pub fn count_of_length(&self, len: u32) -> u32 {
        match self {
            Dictionary::Builtin => WORDS.iter().filter(|w| w.len() as u32 == len).count() as u32,
            Dictionary::Custom(words) => words.iter().filter(|w| w.len() == len).count() as u32,
        }
    }

    /// Uniformly pick a word of exactly `len` letters.
    pub fn pick(&self, env: &Env, len: u32) -> Result<String, Error> {
        let count = self.count_of_length(len);
        if count == 0 {
            return Err(Error::WordUnavailable);
        }
        let index = env.prng().gen_range::<u64>(0..u64::from(count)) as usize;

        let picked = match self {
            Dictionary::Builtin => WORDS
                .iter()
                .filter(|w| w.len() as u32 == len)
                .nth(index)
                .map(|w| String::from_str(env, w)),
            Dictionary::Custom(words) => words.iter().filter(|w| w.len() == len).nth(index),
        };
        picked.ok_or(Error::WordUnavailable)
    }
}

/// Check a deployment-supplied word list.
///
/// Accepts 1..=`MAX_WORD_LIST_LEN` words, each 1..=`MAX_WORD_LEN` lowercase
/// ASCII letters.
pub fn validate_word_list(words: &Vec<String>) -> Result<(), Error> {
    if words.is_empty() || words.len() > MAX_WORD_LIST_LEN {
        return Err(Error::InvalidWordList);
    }
    let mut buf = [0u8; MAX_WORD_LEN];
    for word in words.iter() {
        let bytes = read_word(&word, &mut buf).ok_or(Error::InvalidWordList)?;
        if bytes.is_empty() || !bytes.iter().all(u8::is_ascii_lowercase) {
            return Err(Error::InvalidWordList);
        }
    }
    Ok(())
}

/// Copy a host string into `buf`, returning its bytes.
///
/// Returns `None` when the string is longer than `MAX_WORD_LEN`.
pub fn read_word<'a>(word: &String, buf: &'a mut [u8; MAX_WORD_LEN]) -> Option<&'a [u8]> {
    let len = word.len() as usize;
    let slot = buf.get_mut(..len)?;
    word.copy_into_slice(slot);
    Some(slot)
}

#[cfg(test)]
mod test {
    use super::*;
    use soroban_sdk::vec;

    #[test]
    fn test_builtin_words_are_valid() {
        for word in WORDS {
            assert!(!word.is_empty() && word.len() <= MAX_WORD_LEN, "{word}");
            assert!(word.bytes().all(|b| b.is_ascii_lowercase()), "{word}");
        }
    }

    #[test]
    fn test_builtin_bounds() {
        assert_eq!(
            Dictionary::Builtin.bounds(),
            LengthBounds { min: 3, max: 8 }
        );
        for len in 3..=8 {
            assert_eq!(Dictionary::Builtin.count_of_length(len), 10);
        }
    }

    #[test]
    fn test_custom_bounds_and_gaps() {
        let env = Env::default();
        let words = vec![
            &env,
            String::from_str(&env, "cat"),
            String::from_str(&env, "bird"),
            String::from_str(&env, "strawberry"),
        ];
        let dictionary = Dictionary::Custom(words);
        assert_eq!(dictionary.bounds(), LengthBounds { min: 3, max: 10 });
        assert_eq!(dictionary.count_of_length(5), 0);
        assert_eq!(dictionary.count_of_length(4), 1);
    }

    #[test]
    fn test_validate_word_list() {
        let env = Env::default();
        let ok = vec![&env, String::from_str(&env, "dog")];
        assert_eq!(validate_word_list(&ok), Ok(()));

        let empty: Vec<String> = Vec::new(&env);
        assert_eq!(validate_word_list(&empty), Err(Error::InvalidWordList));

        let upper = vec![&env, String::from_str(&env, "Dog")];
        assert_eq!(validate_word_list(&upper), Err(Error::InvalidWordList));

        let blank = vec![&env, String::from_str(&env, "")];
        assert_eq!(validate_word_list(&blank), Err(Error::InvalidWordList));

        let long = vec![&env, String::from_str(&env, "abcdefghijklmnopq")];
        assert_eq!(validate_word_list(&long), Err(Error::InvalidWordList));
    }

    #[test]
    fn test_read_word_rejects_oversized() {
        let env = Env::default();
        let mut buf = [0u8; MAX_WORD_LEN];
        let word = String::from_str(&env, "lantern");
        assert_eq!(read_word(&word, &mut buf), Some(&b"lantern"[..]));
        let long = String::from_str(&env, "abcdefghijklmnopq");
        assert_eq!(read_word(&long, &mut buf), None);
    }
}
