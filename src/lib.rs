//! Usecase survey — the onboarding question shown right after registration.

pub mod cli;
pub mod config;
pub mod error;
pub mod survey;
