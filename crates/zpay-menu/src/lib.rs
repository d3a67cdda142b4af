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

//! Menu toggle controller for the payments dashboard sidebar.
//!
//! Layout:
//! - `controller.rs`: click handlers for simple, nested, grouped, and sidebar toggles
//! - `dom.rs`: the [`MenuDom`] seam the controller drives
//! - `markup.rs`: class/attribute conventions shared with the templates
//! - `memory.rs`: in-memory document for tests and snapshot replay
//! - `web.rs`: `web_sys` adapter and the page-level listener (wasm32 only)

pub mod controller;
pub mod dom;
pub mod error;
pub mod markup;
pub mod memory;
mod selector;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use controller::{ClickOutcome, ClickReport, MenuController};
pub use dom::MenuDom;
pub use error::{MarkupError, MenuError, MenuResult, SelectorError, SnapshotError};
pub use markup::{ARIA_EXPANDED, MenuMarkup};
pub use memory::{DocumentSnapshot, ElementSpec, MemoryDocument, NodeId, NodeSnapshot};
