//! Table line builder for the listing views
//!
//! Renders headers, a separator and rows with column alignment. Widths are
//! measured in terminal columns so wide glyphs stay aligned.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Columns wider than this are truncated with an ellipsis
const MAX_COLUMN_WIDTH: usize = 40;

const CURSOR_MARKER: &str = "▶ ";
const NO_MARKER: &str = "  ";

/// A single styled table cell
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub text: String,
    pub style: Style,
}

impl Cell {
    pub fn new(text: impl Into<String>) -> Self {
        Self::styled(text, Style::default().fg(Color::White))
    }

    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn dim(text: impl Into<String>) -> Self {
        Self::styled(text, Style::default().fg(Color::DarkGray))
    }
}

/// Pad or truncate `text` to exactly `width` terminal columns
pub fn fit(text: &str, width: usize) -> String {
    let mut out = if text.width() <= width {
        text.to_string()
    } else {
        let budget = width.saturating_sub(3);
        let mut kept = String::new();
        let mut used = 0;
        for c in text.chars() {
            let w = c.width().unwrap_or(0);
            if used + w > budget {
                break;
            }
            kept.push(c);
            used += w;
        }
        kept.push_str(&".".repeat(width.min(3)));
        kept
    };

    let pad = width.saturating_sub(out.width());
    out.push_str(&" ".repeat(pad));
    out
}

/// Build table lines from headers and rows; `cursor` highlights one row
pub fn build_table_lines(headers: &[&str], rows: &[Vec<Cell>], cursor: Option<usize>) -> Vec<Line<'static>> {
    if headers.is_empty() {
        return Vec::new();
    }

    let mut col_widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < col_widths.len() {
                col_widths[i] = col_widths[i].max(cell.text.width());
            }
        }
    }
    for width in &mut col_widths {
        *width = (*width).min(MAX_COLUMN_WIDTH);
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);

    let mut header_spans = vec![Span::raw(NO_MARKER)];
    header_spans.extend(headers.iter().enumerate().flat_map(|(i, h)| {
        [
            Span::styled(
                fit(h, col_widths[i]),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" │ "),
        ]
    }));
    lines.push(Line::from(header_spans));

    let separator: String = col_widths
        .iter()
        .map(|w| "─".repeat(*w))
        .collect::<Vec<_>>()
        .join("─┼─");
    lines.push(Line::from(Span::styled(
        format!("{}{}", NO_MARKER, separator),
        Style::default().fg(Color::DarkGray),
    )));

    for (row_index, row) in rows.iter().enumerate() {
        let is_cursor = cursor == Some(row_index);
        let marker = if is_cursor { CURSOR_MARKER } else { NO_MARKER };

        let mut spans = vec![Span::styled(marker, Style::default().fg(Color::Cyan))];
        spans.extend(row.iter().enumerate().flat_map(|(i, cell)| {
            let width = col_widths.get(i).copied().unwrap_or(10);
            let style = if is_cursor {
                cell.style.bg(Color::Blue).add_modifier(Modifier::BOLD)
            } else {
                cell.style
            };
            [Span::styled(fit(&cell.text, width), style), Span::raw(" │ ")]
        }));
        lines.push(Line::from(spans));
    }

    lines
}

/// Number of lines `build_table_lines` emits before the first row
pub const TABLE_HEADER_LINES: usize = 2;
