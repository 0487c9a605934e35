//! # cpost-cli: Czech Post parcel tracking from the command line
//!
//! ## Subcommands
//!
//! - `history`: every event of a parcel, oldest first
//! - `status`: the newest event
//! - `delivered`: `true`/`false`, exit code 0 only when delivered
//!
//! Argument parsing lives in `main.rs`; handlers here only talk to
//! `cpost-client` and write to the given output.

pub mod track;
