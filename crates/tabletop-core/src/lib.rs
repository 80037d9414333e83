//! Tabletop Core: shared abstractions.
//!
//! This crate defines the traits and types that the map and campaign
//! contexts depend on: time, randomness, errors, commands and configuration.
//! It contains no domain state of its own.

pub mod clock;
pub mod command;
pub mod config;
pub mod error;
pub mod rng;
