//! # Mind Dump CLI
//!
//! A terminal client for `minddumpapp`. The binary is thin: the CLI lives in
//! `src/cli/`, and this file only invokes `cli::run()` and maps failure to an
//! exit code.
//!
//! ## Workspace Structure
//!
//! - `crates/minddumpapp/`: UI-agnostic library (store, reminders, adapters)
//! - `crates/minddump/`: this CLI, depending on `minddumpapp`
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/minddump/src/cli/)                       │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Context wiring + dispatch (commands.rs)                  │
//! │  - Terminal rendering (render.rs, styles.rs)                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Facade (crates/minddumpapp/src/api.rs)                 │
//! │  - One method per intent, returns `CmdResult`               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Reminders on a Terminal
//!
//! A terminal cannot wake itself up, so scheduled reminders go to a spool file
//! in the data directory. `minddump due` prints and drops whatever has fallen
//! due; wire it to cron or a shell prompt hook to get alerts.
//!
//! ## Testing Approach
//!
//! Business logic is tested in `minddumpapp`. The tests here run the real
//! binary with `assert_cmd` against a temporary data directory.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
