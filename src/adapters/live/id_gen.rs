//! Live adapter for the `IdGenerator` port.

use rand::Rng;

use crate::config::{ConfigError, IdSettings};
use crate::ports::IdGenerator;

/// Live ID generator that samples each character uniformly from an alphabet.
pub struct RandomIdGenerator {
    alphabet: Vec<char>,
    length: usize,
}

impl RandomIdGenerator {
    /// Creates a generator drawing `length` characters from `alphabet`.
    ///
    /// # Errors
    ///
    /// Returns an error if the alphabet is empty or `length` is zero.
    pub fn new(alphabet: &str, length: usize) -> Result<Self, ConfigError> {
        if length == 0 {
            return Err(ConfigError::Invalid {
                field: "id.length",
                reason: "must be at least 1".to_string(),
            });
        }
        let alphabet: Vec<char> = alphabet.chars().collect();
        if alphabet.is_empty() {
            return Err(ConfigError::Invalid {
                field: "id.alphabet",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(Self { alphabet, length })
    }

    /// Creates a generator from identifier settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured alphabet is empty or the length is zero.
    pub fn from_settings(settings: &IdSettings) -> Result<Self, ConfigError> {
        Self::new(&settings.alphabet, settings.length)
    }
}

impl IdGenerator for RandomIdGenerator {
    fn generate_id(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..self.length).map(|_| self.alphabet[rng.gen_range(0..self.alphabet.len())]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_ALPHABET;

    #[test]
    fn generates_ids_of_configured_shape() {
        let gen = RandomIdGenerator::from_settings(&IdSettings::default()).unwrap();
        for _ in 0..200 {
            let id = gen.generate_id();
            assert_eq!(id.len(), 8);
            assert!(id.chars().all(|c| DEFAULT_ALPHABET.contains(c)), "unexpected char in {id}");
        }
    }

    #[test]
    fn generates_distinct_ids() {
        let gen = RandomIdGenerator::new(DEFAULT_ALPHABET, 8).unwrap();
        assert_ne!(gen.generate_id(), gen.generate_id());
    }

    #[test]
    fn single_letter_alphabet_is_deterministic() {
        let gen = RandomIdGenerator::new("x", 5).unwrap();
        assert_eq!(gen.generate_id(), "xxxxx");
    }

    #[test]
    fn every_character_gets_drawn() {
        let gen = RandomIdGenerator::new("abcd", 64).unwrap();
        let id = gen.generate_id();
        // 64 draws over 4 letters: a missing letter has probability ~4 * (3/4)^64.
        for c in "abcd".chars() {
            assert!(id.contains(c), "{c} never drawn in {id}");
        }
    }

    #[test]
    fn empty_alphabet_is_rejected() {
        assert!(RandomIdGenerator::new("", 8).is_err());
    }

    #[test]
    fn zero_length_is_rejected() {
        let err = RandomIdGenerator::new(DEFAULT_ALPHABET, 0).err().unwrap();
        assert!(err.to_string().contains("id.length"), "{err}");

        let settings = IdSettings { length: 0, ..IdSettings::default() };
        assert!(RandomIdGenerator::from_settings(&settings).is_err());
    }
}
