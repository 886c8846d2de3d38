//! Dramaturge - Backward-chaining action planner over tag-based entity worlds
//!
//! This crate re-exports all layers of the Dramaturge system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: dramaturge_search     — Exhaustive and greedy backward-chaining search
//! Layer 1: dramaturge_engine     — Matcher, rule engine, chain validation, resolution
//! Layer 0: dramaturge_foundation — Core value types (Entity, Tag, Error)
//! ```

pub use dramaturge_engine as engine;
pub use dramaturge_foundation as foundation;
pub use dramaturge_search as search;
