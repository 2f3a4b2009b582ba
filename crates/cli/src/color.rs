// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::builder::styling::{Ansi256Color, AnsiColor, Color, Style, Styles};
use std::io::IsTerminal;

pub mod codes {
    /// Section headers: pastel cyan / steel blue
    pub const HEADER: u8 = 74;
    /// Commands and literals: light grey
    pub const LITERAL: u8 = 250;
    /// Descriptions and context: medium grey
    pub const CONTEXT: u8 = 245;
}

/// Determine if color output should be enabled.
///
/// Priority: `NO_COLOR=1` disables → `COLOR=1` forces → TTY check.
pub fn should_colorize() -> bool {
    resolve(
        std::env::var("NO_COLOR").is_ok_and(|v| v == "1"),
        std::env::var("COLOR").is_ok_and(|v| v == "1"),
        std::io::stdout().is_terminal(),
    )
}

pub fn stderr_is_terminal() -> bool {
    std::io::stderr().is_terminal()
}

fn resolve(no_color: bool, force: bool, tty: bool) -> bool {
    if no_color {
        return false;
    }
    force || tty
}

/// Build clap `Styles` using the project palette.
pub fn styles() -> Styles {
    if !should_colorize() {
        return Styles::plain();
    }
    Styles::styled()
        .header(Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::HEADER)))))
        .literal(Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::LITERAL)))))
        .placeholder(Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::CONTEXT)))))
}

/// Job counter colors used in jobset listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    Succeeded,
    Failed,
    Scheduled,
}

impl Counter {
    fn color(self) -> AnsiColor {
        match self {
            Counter::Succeeded => AnsiColor::Green,
            Counter::Failed => AnsiColor::Red,
            Counter::Scheduled => AnsiColor::Blue,
        }
    }
}

/// Paint `text` in the counter's color when `enabled`.
pub fn counter(kind: Counter, text: &str, enabled: bool) -> String {
    if !enabled {
        return text.to_string();
    }
    let style = Style::new().fg_color(Some(Color::Ansi(kind.color())));
    format!("{}{}{}", style.render(), text, style.render_reset())
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
