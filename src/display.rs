// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Terminal output for nlc
//!
//! Formatting functions return strings so they can be tested; the `print_*`
//! and status helpers write them out. Colour and syntax highlighting are only
//! applied when the stream is a terminal.

use crossterm::style::{Attribute, Color, Stylize};
use std::io::IsTerminal;
use std::sync::OnceLock;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::as_24_bit_terminal_escaped;

use crate::tools::shell::CommandOutput;

const PAD_X: usize = 3;
const PAD_Y: usize = 1;
const TAB: &str = "    ";

/// Kind of one-line status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Error,
}

impl Status {
    pub fn symbol(&self) -> &'static str {
        match self {
            Status::Success => "✔",
            Status::Error => "✖",
        }
    }

    fn color(&self) -> Color {
        match self {
            Status::Success => Color::Green,
            Status::Error => Color::Red,
        }
    }
}

/// Format a status line, optionally coloured
pub fn format_status(status: Status, message: &str, color: bool) -> String {
    if color {
        format!("{} {}", status.symbol().with(status.color()), message)
    } else {
        format!("{} {}", status.symbol(), message)
    }
}

pub fn success(message: &str) {
    println!(
        "{}",
        format_status(Status::Success, message, std::io::stdout().is_terminal())
    );
}

pub fn error(message: &str) {
    eprintln!(
        "{}",
        format_status(Status::Error, message, std::io::stderr().is_terminal())
    );
}

/// Draw `lines` inside a box with `title` set into the top border.
///
/// `painted` holds the lines to print (possibly carrying escape codes) and must
/// match `lines` one for one; widths are measured on `lines`.
pub fn render_box(title: &str, lines: &[String], painted: &[String], bold_title: bool) -> String {
    let content_width = lines
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .max(title.chars().count() + 2);
    let inner = content_width + PAD_X * 2;

    let shown_title = if bold_title {
        title.attribute(Attribute::Bold).with(Color::White).to_string()
    } else {
        title.to_string()
    };

    let mut out = String::new();
    // "┌─ Title ───┐"
    let rule = inner.saturating_sub(title.chars().count() + 3);
    out.push_str(&format!("┌─ {} {}┐\n", shown_title, "─".repeat(rule)));

    let blank = format!("│{}│\n", " ".repeat(inner));
    for _ in 0..PAD_Y {
        out.push_str(&blank);
    }
    for (plain, shown) in lines.iter().zip(painted) {
        let fill = content_width - plain.chars().count();
        out.push_str(&format!(
            "│{}{}{}{}│\n",
            " ".repeat(PAD_X),
            shown,
            " ".repeat(fill),
            " ".repeat(PAD_X)
        ));
    }
    for _ in 0..PAD_Y {
        out.push_str(&blank);
    }
    out.push_str(&format!("└{}┘", "─".repeat(inner)));
    out
}

struct Highlighter {
    syntaxes: SyntaxSet,
    theme: Theme,
}

fn highlighter() -> Option<&'static Highlighter> {
    static HIGHLIGHTER: OnceLock<Option<Highlighter>> = OnceLock::new();
    HIGHLIGHTER
        .get_or_init(|| {
            let syntaxes = SyntaxSet::load_defaults_nonewlines();
            let mut themes = ThemeSet::load_defaults();
            let theme = themes.themes.remove("base16-ocean.dark")?;
            Some(Highlighter { syntaxes, theme })
        })
        .as_ref()
}

/// Highlight shell source line by line; lines that fail come back unchanged
pub fn highlight_shell(lines: &[String]) -> Vec<String> {
    let Some(hl) = highlighter() else {
        return lines.to_vec();
    };
    let Some(syntax) = hl.syntaxes.find_syntax_by_extension("sh") else {
        return lines.to_vec();
    };

    let mut state = HighlightLines::new(syntax, &hl.theme);
    lines
        .iter()
        .map(|line| match state.highlight_line(line, &hl.syntaxes) {
            Ok(regions) => format!("{}\x1b[0m", as_24_bit_terminal_escaped(&regions, false)),
            Err(_) => line.clone(),
        })
        .collect()
}

/// Format source text as a titled box, highlighting when `color` is set
pub fn format_code_box(title: &str, source: &str, color: bool) -> String {
    let lines: Vec<String> = source
        .trim_end_matches('\n')
        .split('\n')
        .map(|l| l.replace('\t', TAB))
        .collect();
    let painted = if color {
        highlight_shell(&lines)
    } else {
        lines.clone()
    };
    render_box(title, &lines, &painted, color)
}

/// Show a proposed command as `$ <command>`
pub fn print_command(command: &str) {
    let color = std::io::stdout().is_terminal();
    println!();
    println!(
        "{}",
        format_code_box("Proposed Command", &format!("$ {}", command), color)
    );
    println!();
}

pub fn print_script(script: &str) {
    let color = std::io::stdout().is_terminal();
    println!();
    println!("{}", format_code_box("Generated Script", script, color));
    println!();
}

/// Report what a command printed and how it ended
pub fn print_command_output(output: &CommandOutput) {
    if let Some(reason) = &output.launch_error {
        error(reason);
    }
    let stdout = output.stdout.trim();
    if !stdout.is_empty() {
        println!("{}", stdout);
    }
    let stderr = output.stderr.trim();
    if !stderr.is_empty() {
        eprintln!("{}", stderr);
    }
    if let Some(code) = exit_failure(output) {
        error(&code);
    }
}

fn exit_failure(output: &CommandOutput) -> Option<String> {
    match output.exit_code {
        Some(0) | None => None,
        Some(code) => Some(format!("Command exited with status {}", code)),
    }
}
