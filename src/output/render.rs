//! Tree rendering - largest entries first, depth-limited, top-N
//!
//! `TreeRenderer` offers a plain `format` path (used by tests) and a
//! colored `print` path over termcolor, both driven by the same line
//! model.

use std::io::{self, Write};

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::tree::TreeNode;

use super::format::format_size;

const SIZE_COLUMN_WIDTH: usize = 10;
const DIVIDER_WIDTH: usize = 40;

const MB: u64 = 1024 * 1024;
const GB: u64 = 1024 * MB;

/// Configuration for tree rendering.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// How many levels below the starting node to descend.
    pub max_depth: usize,
    /// At most this many children per directory; `None` shows all.
    pub top: Option<usize>,
    pub use_color: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: 2,
            top: Some(2),
            use_color: true,
        }
    }
}

/// One line of rendered output.
enum RenderLine {
    Entry { size: u64, label: String },
    Divider,
    Footer { shown: u64, total: u64 },
}

pub struct TreeRenderer {
    config: RenderConfig,
}

impl TreeRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render to a plain string.
    pub fn format(&self, node: &mut TreeNode) -> String {
        let mut out = String::new();
        for line in self.render(node) {
            out.push_str(&self.plain_line(&line));
            out.push('\n');
        }
        out
    }

    /// Render to stdout with colors.
    pub fn print(&self, node: &mut TreeNode) -> io::Result<()> {
        let choice = if self.config.use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        let mut stdout = StandardStream::stdout(choice);
        for line in self.render(node) {
            self.print_line(&mut stdout, &line)?;
        }
        stdout.reset()?;
        Ok(())
    }

    /// Build the line model. Children are re-sorted largest-first as a
    /// side effect, and the order sticks.
    fn render(&self, node: &mut TreeNode) -> Vec<RenderLine> {
        let total = node.resolve_size();
        let mut lines = vec![RenderLine::Entry {
            size: total,
            label: node.path.display().to_string(),
        }];
        if self.config.max_depth == 0 {
            return lines;
        }

        node.sort_children_by_size();
        let limit = self.config.top.unwrap_or(node.children.len());
        let mut shown = 0u64;
        for child in node.children.iter_mut().take(limit) {
            shown += child.resolve_size();
            self.render_subtree(child, self.config.max_depth - 1, &mut lines);
            lines.push(RenderLine::Divider);
        }
        lines.push(RenderLine::Footer { shown, total });
        lines
    }

    fn render_subtree(&self, node: &mut TreeNode, depth: usize, lines: &mut Vec<RenderLine>) {
        lines.push(RenderLine::Entry {
            size: node.resolve_size(),
            label: indented_label(node),
        });
        if depth == 0 {
            return;
        }
        node.sort_children_by_size();
        let limit = self.config.top.unwrap_or(node.children.len());
        for child in node.children.iter_mut().take(limit) {
            self.render_subtree(child, depth - 1, lines);
        }
    }

    fn plain_line(&self, line: &RenderLine) -> String {
        match line {
            RenderLine::Entry { size, label } => {
                format!("{:<SIZE_COLUMN_WIDTH$}\t{}", format_size(*size), label)
            }
            RenderLine::Divider => "-".repeat(DIVIDER_WIDTH),
            RenderLine::Footer { shown, total } => {
                format!("{} of {} shown", format_size(*shown), format_size(*total))
            }
        }
    }

    fn print_line(&self, stdout: &mut StandardStream, line: &RenderLine) -> io::Result<()> {
        match line {
            RenderLine::Entry { size, label } => {
                stdout.set_color(
                    ColorSpec::new()
                        .set_fg(Some(size_color(*size)))
                        .set_bold(*size >= GB),
                )?;
                write!(stdout, "{:<SIZE_COLUMN_WIDTH$}", format_size(*size))?;
                stdout.reset()?;
                writeln!(stdout, "\t{}", label)
            }
            RenderLine::Divider => {
                stdout.set_color(ColorSpec::new().set_dimmed(true))?;
                writeln!(stdout, "{}", "-".repeat(DIVIDER_WIDTH))
            }
            RenderLine::Footer { shown, total } => {
                stdout.set_color(ColorSpec::new().set_bold(true))?;
                writeln!(
                    stdout,
                    "{} of {} shown",
                    format_size(*shown),
                    format_size(*total)
                )
            }
        }
    }
}

fn size_color(size: u64) -> Color {
    if size >= GB {
        Color::Red
    } else if size >= MB {
        Color::Yellow
    } else {
        Color::Green
    }
}

/// The indented display name: leading spaces matching the joined length
/// of all but the last two path segments, then the last two segments
/// joined by the path separator.
fn indented_label(node: &TreeNode) -> String {
    let display = node.path.display().to_string();
    let sep = std::path::MAIN_SEPARATOR;
    let parts: Vec<&str> = display.split(sep).collect();
    if parts.len() < 3 {
        return display;
    }
    let indent = parts[..parts.len() - 2].join(&sep.to_string()).len();
    let name = parts[parts.len() - 2..].join(&sep.to_string());
    format!("{}{}", " ".repeat(indent), name)
}
