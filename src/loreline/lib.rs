//! # Loreline Architecture
//!
//! Loreline keeps notes about invented worlds on a calendar the user defines:
//! named months of arbitrary length, eras, millennia, centuries and decades,
//! and years counted before or after a founding "union". It is a library
//! first; the `loreline` binary is one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, normalizes selectors          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Business operations returning CmdResult                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - DataStore trait, FileStore and InMemoryStore             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Beside the layers sits the timeline engine ([`timeline`]): ordering,
//! labelling, grouping and export of notes. It is pure; it takes borrowed
//! snapshots and never fails, so every layer above can call it freely.
//!
//! From `api.rs` inward nothing writes to stdout/stderr or exits the process.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`timeline`]: Comparator, formatter, grouping and export text
//! - [`calendar`]: Calendar structure and the partial date value
//! - [`model`]: The `Note` record
//! - [`store`]: Storage abstraction and implementations
//! - [`index`]: Display indexing (`1`, `p1`, ranges)
//! - [`config`]: Configuration management
//! - [`init`]: Data directory resolution and context setup
//! - [`error`]: Error types

pub mod api;
pub mod calendar;
pub mod commands;
pub mod config;
pub mod error;
pub mod index;
pub mod init;
pub mod model;
pub mod store;
pub mod timeline;
