// src/strength.rs
use crate::models::{StrengthLabel, StrengthVerdict};

pub const MIN_LENGTH: usize = 12;

const LENGTH_SUGGESTION: &str = "Password should be at least 12 characters long.";
const LOWERCASE_SUGGESTION: &str = "Password should contain at least one lowercase letter.";
const UPPERCASE_SUGGESTION: &str = "Password should contain at least one uppercase letter.";
const DIGIT_SUGGESTION: &str = "Password should contain at least one digit.";
const SPECIAL_SUGGESTION: &str = "Password should contain at least one special character.";
const FALLBACK_SUGGESTION: &str = "Consider using a longer and more complex password.";

/// Score a password against five composition checks.
///
/// Each passed check adds one point; each failed check adds its suggestion,
/// in check order. 5 points is Strong, 3-4 Moderate, anything lower Weak.
pub fn evaluate(password: &str) -> StrengthVerdict {
    let checks: [(bool, &str); 5] = [
        (password.chars().count() >= MIN_LENGTH, LENGTH_SUGGESTION),
        (password.chars().any(char::is_lowercase), LOWERCASE_SUGGESTION),
        (password.chars().any(char::is_uppercase), UPPERCASE_SUGGESTION),
        (password.chars().any(|c| c.is_ascii_digit()), DIGIT_SUGGESTION),
        (password.chars().any(|c| c.is_ascii_punctuation()), SPECIAL_SUGGESTION),
    ];

    let mut score = 0u8;
    let mut suggestions = Vec::new();

    for (passed, suggestion) in checks {
        if passed {
            score += 1;
        } else {
            suggestions.push(suggestion.to_string());
        }
    }

    let label = StrengthLabel::from_score(score);

    if label == StrengthLabel::Weak && suggestions.is_empty() {
        suggestions.push(FALLBACK_SUGGESTION.to_string());
    }

    StrengthVerdict { label, score, suggestions }
}
