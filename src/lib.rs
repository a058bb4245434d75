//! Acd - validator and reporter for ACD metadata in source comments
//!
//! Acd is a CLI tool and library for extracting, validating, and reporting on
//! ACD (Autonomous Continuous Development) metadata blocks embedded in
//! source-code comments. It scans a source tree, parses `AI_*` tag blocks into
//! structured records, checks them against the tag schema, builds the
//! phase-dependency graph, and exports machine- and human-readable reports.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (user-facing commands)
//! - `config`: Configuration file loading and parsing
//! - `core`: Core scan engine (locate -> parse -> validate -> aggregate)
//! - `export`: Report serializers (JSON, CSV, Markdown, DOT)
//! - `issues`: Issue type definitions and ordering
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod export;
pub mod issues;
pub mod utils;
