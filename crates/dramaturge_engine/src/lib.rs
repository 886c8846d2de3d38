//! Rule engine, tag matching, chain validation, and record resolution for Dramaturge.
//!
//! This crate provides:
//! - [`Assignment`] - Positional mapping from rule participant slots to pool entities
//! - [`Pattern`] - Signed tag templates over rule-local participant slots
//! - [`matcher`] - The weak positional tag-matching calculus
//! - [`Rule`] - Forward (simulate) and backward (regress) rule application
//! - [`Chain`] / [`check_chain`] - Candidate chains and forward-replay validation
//! - [`resolve`] - Conversion from name-based parser records to index-based rules

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod assign;
mod chain;
pub mod matcher;
mod pattern;
pub mod resolve;
mod rule;

pub use assign::Assignment;
pub use chain::{Chain, ChainStep, check_chain};
pub use pattern::Pattern;
pub use rule::Rule;
