//! Home screen rendering
//!
//! Header with the host output and the active view, the file selector on
//! the left, the view panel on the right, then status and help bars.

use crate::component::Component;
use crate::components::{calculate_main_layout, FileSelector, ViewPanel};
use crate::model::ui::Focus;
use anyhow::Result;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Placeholder shown when the host supplied no tool output
pub const NO_HOST_OUTPUT: &str = "NO TOOL OUTPUT FOUND";

/// Context needed for rendering the home screen
pub struct HomeRenderContext<'a> {
    /// Tool output handed over by the embedding host, if any
    pub host_output: Option<&'a str>,
    /// File whose body the view panel shows
    pub rendered_file: Option<&'a str>,
    /// Name of the configured view, registered or not
    pub view_name: Option<&'a str>,
    pub status_message: Option<&'a str>,
    pub error: Option<&'a str>,
    pub focus: Focus,
}

pub fn draw_home_screen(
    frame: &mut Frame,
    area: Rect,
    files: &mut FileSelector,
    panel: &mut ViewPanel,
    ctx: &HomeRenderContext,
) -> Result<()> {
    let has_status = ctx.status_message.is_some() || ctx.error.is_some();
    let layout = calculate_main_layout(area, has_status);

    render_header(frame, layout.header, ctx);
    files.draw(frame, layout.files)?;
    panel.draw(frame, layout.view)?;

    if let Some(status_area) = layout.status {
        render_status_bar(frame, status_area, ctx);
    }
    render_help_bar(frame, layout.help, ctx.focus, panel.search_mode());

    Ok(())
}

/// "Rendering: <view> for <file>" once both are known
pub fn rendering_label(view_name: Option<&str>, file: Option<&str>) -> Option<String> {
    match (view_name, file) {
        (Some(view), Some(file)) => Some(format!("Rendering: {} for {}", view, file)),
        _ => None,
    }
}

fn render_header(frame: &mut Frame, area: Rect, ctx: &HomeRenderContext) {
    let host_line = match ctx.host_output {
        Some(output) => Line::from(vec![
            Span::styled("Tool output: ", Style::default().fg(Color::DarkGray)),
            Span::styled(output.to_string(), Style::default().fg(Color::White)),
        ]),
        None => Line::from(Span::styled(
            NO_HOST_OUTPUT,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
    };

    let mut lines = vec![host_line];
    if let Some(label) = rendering_label(ctx.view_name, ctx.rendered_file) {
        lines.push(Line::from(Span::styled(label, Style::default().fg(Color::Cyan))));
    }

    let header = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Tool Output Viewer ")
            .title_style(Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD))
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(header, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, ctx: &HomeRenderContext) {
    let span = match (ctx.error, ctx.status_message) {
        (Some(error), _) => Span::styled(format!(" Error: {} ", error), Style::default().fg(Color::Red)),
        (None, Some(status)) => Span::styled(format!(" {} ", status), Style::default().fg(Color::Yellow)),
        (None, None) => Span::raw(""),
    };
    frame.render_widget(Paragraph::new(Line::from(span)), area);
}

fn key_hint(key: &'static str, color: Color) -> Span<'static> {
    Span::styled(key, Style::default().fg(color).add_modifier(Modifier::BOLD))
}

fn render_help_bar(frame: &mut Frame, area: Rect, focus: Focus, search_mode: bool) {
    let spans = if search_mode {
        vec![
            key_hint(" Esc/Enter ", Color::Yellow),
            Span::raw("Done  "),
            key_hint(" Backspace ", Color::Cyan),
            Span::raw("Delete"),
        ]
    } else {
        let mut spans = vec![
            key_hint(" q ", Color::Yellow),
            Span::raw("Quit "),
            key_hint(" Tab ", Color::Cyan),
            Span::raw("Focus "),
        ];
        match focus {
            Focus::Files => {
                spans.push(key_hint(" Enter ", Color::Green));
                spans.push(Span::raw("Load "));
            }
            Focus::View => {
                spans.push(key_hint(" / ", Color::Cyan));
                spans.push(Span::raw("Search "));
                spans.push(key_hint(" n/p ", Color::Cyan));
                spans.push(Span::raw("Page "));
                spans.push(key_hint(" s ", Color::Cyan));
                spans.push(Span::raw("Sort "));
            }
        }
        spans.push(key_hint(" ? ", Color::White));
        spans.push(Span::raw("Help"));
        spans
    };

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(paragraph, area);
}
