//! dumpindex - inspect FFMS2 index files
//!
//! This library crate exposes the command-line plumbing for integration testing.
//! Decoding itself lives in `dumpindex-ffindex`.

pub mod config;
pub mod output;
