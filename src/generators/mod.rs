// src/generators/mod.rs

pub mod password;

pub use password::{PasswordGenerator, GeneratorError, generate_strong_password, DEFAULT_PASSWORD_LENGTH};
