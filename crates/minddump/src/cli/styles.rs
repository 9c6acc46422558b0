//! Terminal styles for the list and reminder views.
//!
//! Code refers to styles by what they show (a date header, a task row), never
//! by colour. All of them are built once through `once_cell::sync::Lazy`.
//! `console` drops the escape codes when stdout is not a terminal.

use console::Style;
use once_cell::sync::Lazy;

pub struct Styles {
    pub date_header: Style,
    pub time: Style,
    pub thought: Style,
    pub task: Style,
    pub task_marker: Style,
    pub id: Style,
    pub empty: Style,
}

pub static STYLES: Lazy<Styles> = Lazy::new(|| Styles {
    date_header: Style::new().bold().underlined(),
    time: Style::new().color256(245).italic(),
    thought: Style::new(),
    task: Style::new().bold(),
    task_marker: Style::new().yellow(),
    id: Style::new().color256(240),
    empty: Style::new().dim(),
});
