//! # Mind Dump Architecture
//!
//! Mind Dump is an on-device journal: short free-text **thoughts**, and
//! **tasks** that ask the host to fire a one-shot reminder at a chosen date
//! and time. Everything lives on the device; there is no account and no sync.
//!
//! This crate is the UI-agnostic core. The `minddump` binary is one client of
//! it; a different shell could drive the same [`api::MindDumpApi`].
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  UI client (e.g. the minddump CLI)                          │
//! │  - Parses input, renders history and messages               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Facade (api.rs)                                        │
//! │  - One method per UI intent, returns `CmdResult`            │
//! └─────────────────────────────────────────────────────────────┘
//!                 │                             │
//!                 ▼                             ▼
//! ┌───────────────────────────────┐ ┌───────────────────────────┐
//! │  Entry Store (store.rs)       │ │  Reminder Coordinator     │
//! │  - Snapshot + mirror writes   │◀│  (reminder.rs)            │
//! │  - Change listeners           │ │  - Permission, scheduling │
//! └───────────────────────────────┘ └───────────────────────────┘
//!                 │                             │
//!                 ▼                             ▼
//! ┌───────────────────────────────┐ ┌───────────────────────────┐
//! │  KvBackend (kv/)              │ │  Notifier (notify/)       │
//! │  FsKv | MemKv                 │ │  SpoolNotifier | MemNotif │
//! └───────────────────────────────┘ └───────────────────────────┘
//! ```
//!
//! ## Key Rules
//!
//! - The in-memory snapshot is the source of truth while running. The whole
//!   list is re-serialized to storage after every mutation; failed writes are
//!   logged and dropped.
//! - A task is stored before its reminder is requested, and a failed request
//!   never removes it.
//! - Listeners see the new snapshot after every change, including the
//!   initial load.
//!
//! ## Testing
//!
//! Every adapter has an in-memory twin ([`kv::mem_backend::MemKv`],
//! [`notify::mem::MemNotifier`], [`clock::FixedClock`]), so the store,
//! coordinator and facade are tested without touching the filesystem.

pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod history;
pub mod init;
pub mod kv;
pub mod logging;
pub mod model;
pub mod notify;
pub mod reminder;
pub mod store;
