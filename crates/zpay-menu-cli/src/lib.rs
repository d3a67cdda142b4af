#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions, clippy::redundant_pub_crate)]

//! Developer CLI for replaying dashboard menu clicks against JSON snapshots.
//!
//! Layout:
//! - `cli.rs`: argument parsing and command dispatch
//! - `commands/`: `replay` and `check-markup` handlers
//! - `error.rs`: validation vs. failure errors and exit codes
//! - `main.rs`: thin entrypoint delegating to `run()`

pub(crate) mod cli;
pub(crate) mod commands;
pub(crate) mod error;

pub use cli::{run, run_with_args};
