//! # CLI Layer
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Structure
//!
//! - `run()`: parses, builds the context, dispatches (called by `main.rs`)
//! - `init_context()`: resolves the data directory, starts logging, loads entries
//! - `handle_*()`: one per command, calls the API and prints the result

use super::render::{print_messages, render_due, render_history, render_pending};
use super::setup::{Cli, Commands};
use chrono::{Local, Utc};
use clap::Parser;
use minddumpapp::error::Result;
use minddumpapp::init::{initialize, MindDumpContext};
use minddumpapp::logging::init_logging;
use minddumpapp::model::encode_entries;
use std::io::{IsTerminal, Read};

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut ctx = init_context(&cli)?;

    match cli.command {
        None => handle_list(&ctx, false),
        Some(Commands::List { json }) => handle_list(&ctx, json),
        Some(Commands::Add { text }) => handle_add(&mut ctx, text),
        Some(Commands::Task { text, date, time }) => handle_task(&mut ctx, text, date, time),
        Some(Commands::Delete { ids }) => handle_delete(&mut ctx, &ids),
        Some(Commands::Clear) => handle_clear(&mut ctx),
        Some(Commands::Due) => handle_due(&ctx),
        Some(Commands::Reminders) => handle_reminders(&ctx),
    }
}

fn init_context(cli: &Cli) -> Result<MindDumpContext> {
    let mut ctx = initialize(cli.data.clone())?;

    let level = if cli.verbose {
        "debug".to_string()
    } else {
        ctx.config.log_level.clone()
    };
    // Best-effort: a read-only data dir must not stop the journal.
    if let Err(e) = init_logging(&level, &ctx.log_dir()) {
        if cli.verbose {
            eprintln!("Warning: logging disabled: {}", e);
        }
    }

    let startup = ctx.api.bootstrap();
    print_messages(&startup.messages);
    Ok(ctx)
}

/// Joins words, or reads piped stdin when there are none.
fn collect_text(words: Vec<String>) -> Result<String> {
    if words.is_empty() && !std::io::stdin().is_terminal() {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        return Ok(buffer);
    }
    Ok(words.join(" "))
}

fn handle_list(ctx: &MindDumpContext, json: bool) -> Result<()> {
    if json {
        println!("{}", encode_entries(ctx.api.snapshot())?);
        return Ok(());
    }
    print!("{}", render_history(&ctx.api.history(), &Local));
    Ok(())
}

fn handle_add(ctx: &mut MindDumpContext, words: Vec<String>) -> Result<()> {
    let text = collect_text(words)?;
    let result = ctx.api.add_thought(&text);
    print_messages(&result.messages);
    Ok(())
}

fn handle_task(
    ctx: &mut MindDumpContext,
    words: Vec<String>,
    date: Option<chrono::NaiveDate>,
    time: Option<chrono::NaiveTime>,
) -> Result<()> {
    let text = collect_text(words)?;
    let now = Local::now();
    let date = date.unwrap_or_else(|| now.date_naive());
    let time = time.unwrap_or_else(|| now.time());

    let result = ctx.api.confirm_task(&text, date, time);
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut MindDumpContext, ids: &[String]) -> Result<()> {
    let result = ctx.api.delete(ids);
    print_messages(&result.messages);
    Ok(())
}

fn handle_clear(ctx: &mut MindDumpContext) -> Result<()> {
    let result = ctx.api.clear_all();
    print_messages(&result.messages);
    Ok(())
}

fn handle_due(ctx: &MindDumpContext) -> Result<()> {
    let now = Utc::now();
    let due = ctx.spool().take_due(now)?;
    log::debug!("delivering {} due reminders", due.len());
    print!("{}", render_due(&due, now));
    Ok(())
}

fn handle_reminders(ctx: &MindDumpContext) -> Result<()> {
    let pending = ctx.spool().pending()?;
    print!("{}", render_pending(&pending, &Local));
    Ok(())
}
