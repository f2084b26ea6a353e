//! Locale Sync - pull translations from a hosted service into locale bundles
//!
//! This crate provides the core functionality for the `locale-sync` CLI tool.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap
//! - [`sync`] - Corpus fetch, bundle merge and the per-file sync loop
//! - [`catalog`] - Key lookup over the persisted bundles
//! - [`config`] - Configuration management
//! - [`error`] - Error types and handling

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod sync;

pub use error::{Error, Result};
