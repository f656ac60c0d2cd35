//! Foundation types for Terminal Infiltrator.
//!
//! This crate contains the presentation-agnostic types shared by every other
//! crate in the workspace: the error enum, raw input events forwarded by the
//! presentation layer, and the TOML-backed game configuration.

pub mod config;
pub mod error;
pub mod input;
