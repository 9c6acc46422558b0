//! # Persistence Layer
//!
//! The entry list is mirrored into a single string value stored under
//! [`STORAGE_KEY`]. [`KvBackend`] is the seam between the Entry Store and
//! whatever actually keeps that string:
//!
//! - [`fs_backend::FsKv`]: one file per key in the data directory, written
//!   atomically (temp file + rename).
//! - [`mem_backend::MemKv`]: in-memory map for tests, with switches to
//!   simulate failing reads and writes.
//!
//! Persistence is best-effort. Backends report failures through `Result`; the
//! store logs and drops them, and the next successful write supersedes
//! whatever was lost.
//!
//! ## Storage Layout
//!
//! ```text
//! <data_dir>/
//! ├── mind_dump_entries.json   # the @mind_dump_entries value
//! ├── reminders.json           # reminder spool (see notify::spool)
//! └── logs/
//! ```

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;

pub use backend::KvBackend;

/// The one key the entry list lives under.
pub const STORAGE_KEY: &str = "@mind_dump_entries";
