// src/generators/password.rs
use rand::distributions::{Distribution, Uniform};
use thiserror::Error;
use crate::models::PasswordGenerationOptions;

pub const DEFAULT_PASSWORD_LENGTH: usize = 12;
pub const MIN_GENERATED_LENGTH: usize = 4;
pub const MAX_GENERATED_LENGTH: usize = 128;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
abcdefghijklmnopqrstuvwxyz\
0123456789\
!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("Password length must be between {min} and {max} characters, got {got}")]
    InvalidLength { min: usize, max: usize, got: usize },
}

/// Draw `length` characters uniformly from letters, digits and ASCII punctuation.
///
/// `thread_rng` is a CSPRNG seeded from the OS, which is stronger than these
/// user-facing suggestions strictly need.
pub fn generate_strong_password(length: usize) -> String {
    let mut rng = rand::thread_rng();
    let dist = Uniform::from(0..ALPHABET.len());

    (0..length)
        .map(|_| ALPHABET[dist.sample(&mut rng)] as char)
        .collect()
}

pub struct PasswordGenerator;

impl PasswordGenerator {
    pub fn new() -> Self {
        PasswordGenerator
    }

    pub fn generate_password(&self, options: &PasswordGenerationOptions) -> Result<String, GeneratorError> {
        if !(MIN_GENERATED_LENGTH..=MAX_GENERATED_LENGTH).contains(&options.length) {
            return Err(GeneratorError::InvalidLength {
                min: MIN_GENERATED_LENGTH,
                max: MAX_GENERATED_LENGTH,
                got: options.length,
            });
        }

        Ok(generate_strong_password(options.length))
    }
}

impl Default for PasswordGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn alphabet_is_letters_digits_and_punctuation() {
        assert_eq!(ALPHABET.len(), 26 + 26 + 10 + 32);
        assert!(ALPHABET.iter().all(|b| b.is_ascii_alphanumeric() || b.is_ascii_punctuation()));
        let unique: HashSet<_> = ALPHABET.iter().collect();
        assert_eq!(unique.len(), ALPHABET.len());
    }

    #[test]
    fn generated_password_has_requested_length() {
        for length in [0, 1, 12, 40] {
            let password = generate_strong_password(length);
            assert_eq!(password.chars().count(), length);
            assert!(password.bytes().all(|b| ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn generated_passwords_do_not_collide() {
        let samples: HashSet<String> = (0..1000)
            .map(|_| generate_strong_password(DEFAULT_PASSWORD_LENGTH))
            .collect();
        assert_eq!(samples.len(), 1000);
    }

    #[test]
    fn generator_rejects_out_of_range_lengths() {
        let generator = PasswordGenerator::new();

        assert!(generator.generate_password(&PasswordGenerationOptions { length: 3 }).is_err());
        assert!(generator.generate_password(&PasswordGenerationOptions { length: 129 }).is_err());

        let password = generator
            .generate_password(&PasswordGenerationOptions::default())
            .unwrap();
        assert_eq!(password.len(), DEFAULT_PASSWORD_LENGTH);
    }
}
