// src/api/handlers/mod.rs
pub mod audit;
pub mod generator;
pub mod system;
