//! Terminal output.

use colored::Colorize;
use std::io::{self, Write};

/// Displays a finished summary.
pub trait Renderer {
    fn render(&mut self, summary: &str) -> io::Result<()>;
}

/// Writes summaries to a terminal or any other writer.
///
/// When styling is on, Markdown heading lines are highlighted. The text
/// itself is never altered.
pub struct TerminalRenderer<W: Write> {
    out: W,
    styled: bool,
}

impl TerminalRenderer<io::Stdout> {
    /// Render to stdout, styled only when stdout is a terminal
    pub fn stdout() -> Self {
        Self::new(io::stdout(), atty::is(atty::Stream::Stdout))
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, styled: bool) -> Self {
        Self { out, styled }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, summary: &str) -> io::Result<()> {
        if self.styled {
            for line in summary.lines() {
                if is_heading(line) {
                    writeln!(self.out, "{}", line.bold().cyan())?;
                } else {
                    writeln!(self.out, "{line}")?;
                }
            }
        } else {
            self.out.write_all(summary.as_bytes())?;
            if !summary.ends_with('\n') {
                self.out.write_all(b"\n")?;
            }
        }
        self.out.flush()
    }
}

fn is_heading(line: &str) -> bool {
    let hashes = line.chars().take_while(|&c| c == '#').count();
    (1..=6).contains(&hashes) && line[hashes..].starts_with(' ')
}
