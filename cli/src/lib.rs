//! firedrop-cli library, exposing modules for unit tests.

pub mod cards;
pub mod commands;
