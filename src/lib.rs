//! Credential auditing: test username/password pairs against a login form
//! and grade each password's composition.
//!
//! The library has no process-wide state; [`api`] and the binary's CLI are
//! thin adapters over [`auditor::CredentialTester`] and [`strength::evaluate`].

pub mod api;
pub mod auditor;
pub mod core;
pub mod generators;
pub mod importers;
pub mod logging;
pub mod models;
pub mod strength;
