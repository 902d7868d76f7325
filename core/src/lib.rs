//! Core engine for firedrop: mirror a set of named text cards into a
//! Dify-style knowledge base over its dataset REST API.
//!
//! The flow is dataset resolution (find or create), per-card document
//! reconciliation (create, update or force-recreate), and optional
//! polling of the service's indexing pipeline. `cli` drives this crate;
//! consumers should import through [`api`].

pub mod api;
pub mod config;
pub mod error;
pub mod knowledge;
pub mod progress;
