use super::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};
use trigger_core::Screen;

/// Draw the prompt, or the last message when no prompt is open.
pub fn draw_prompt_line(f: &mut Frame, area: Rect, screen: &Screen, theme: &Theme) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    if let Some((label, input)) = &screen.prompt {
        let line = Line::from(vec![
            Span::styled(label.as_str(), Style::default().fg(theme.highlight)),
            Span::raw(input.as_str()),
        ]);
        f.render_widget(Paragraph::new(line), area);

        let typed = u16::try_from(label.chars().count() + input.chars().count())
            .unwrap_or(u16::MAX);
        let cursor_x = area
            .x
            .saturating_add(typed)
            .min(area.right().saturating_sub(1));
        f.set_cursor_position((cursor_x, area.y));
    } else if let Some(message) = &screen.message {
        let line = Line::from(Span::styled(
            message.as_str(),
            Style::default().fg(theme.paused),
        ));
        f.render_widget(Paragraph::new(line), area);
    }
}
