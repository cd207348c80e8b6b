use super::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
};

pub fn draw_help_overlay(f: &mut Frame, area: Rect, lines: &[String], theme: &Theme) {
    f.render_widget(Clear, area);

    let text: Vec<Line> = lines.iter().map(|line| Line::from(line.as_str())).collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.highlight))
        .title(" j/k to scroll ");

    f.render_widget(Paragraph::new(text).block(block), area);
}
