use super::helpers::{highlighted_border_style, pad_title};
use super::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use trigger_core::TimerView;

/// Draw one timer box: centered heading, underline, blank line, time.
pub fn draw_timer(f: &mut Frame, area: Rect, view: &TimerView, highlighted: bool, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(highlighted_border_style(
            highlighted,
            theme.highlight,
            theme.border,
        ));

    let inner_width = area.width.saturating_sub(2) as usize;
    let heading = pad_title(&view.heading(), inner_width.saturating_sub(1));
    let heading_style = if highlighted {
        Style::default()
            .fg(theme.highlight)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let time_color = if view.running {
        theme.running
    } else {
        theme.paused
    };

    let lines = vec![
        Line::from(Span::styled(heading, heading_style)),
        Line::from(Span::styled(
            "-".repeat(inner_width),
            Style::default().fg(theme.border),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(" {}", view.status_line()),
            Style::default().fg(time_color),
        )),
    ];

    f.render_widget(Paragraph::new(lines).block(block), area);
}
