//! # CLI Behavior
//!
//! This is **one possible UI client** for Mind Dump. It is the only place
//! that knows about terminal I/O, exit codes and output formatting.
//!
//! ### Naked Execution (`minddump`)
//!
//! Running `minddump` with no arguments defaults to `minddump list`.
//!
//! ### Adding Text
//!
//! `add` and `task` join their words with single spaces. With no words and
//! piped stdin, the piped text is used instead:
//!
//! ```bash
//! echo "call the plumber" | minddump add
//! ```
//!
//! Blank text is never saved; the command reports it and exits successfully.
//!
//! ### Tasks
//!
//! `minddump task <words> --date 2024-05-02 --time 14:30` stores a task and
//! schedules its reminder. Either flag defaults to the current local date or
//! time. Past instants are accepted and fall due immediately.
//!
//! ### Output Streams
//!
//! Results go to stdout. The notification advisory and diagnostics go to
//! stderr, so `minddump list --json` stays machine readable.

mod commands;
mod render;
mod setup;
mod styles;

pub use commands::run;
