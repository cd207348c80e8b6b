pub mod helpers;
mod help;
mod input;
mod timers;

use help::draw_help_overlay;
use helpers::parse_color;
use input::draw_prompt_line;
use ratatui::{
    Frame, Terminal,
    backend::Backend,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders},
};
use std::io;
use timers::draw_timer;
use trigger_core::models::{ColorConfig, LayoutConfig};
use trigger_core::{Renderer, Screen, TimerView};

/// Colors resolved once from the configured names.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub running: Color,
    pub paused: Color,
    pub highlight: Color,
    pub border: Color,
}

impl Theme {
    pub fn from_config(colors: &ColorConfig) -> Self {
        Self {
            running: parse_color(&colors.running, Color::Green),
            paused: parse_color(&colors.paused, Color::Yellow),
            highlight: parse_color(&colors.highlight, Color::Cyan),
            border: parse_color(&colors.border, Color::Gray),
        }
    }
}

/// Draws the session onto a ratatui terminal. Every call updates the cached
/// screen and repaints the whole frame; ratatui only flushes the cells that
/// changed.
pub struct TerminalRenderer<B: Backend> {
    terminal: Terminal<B>,
    screen: Screen,
    layout: LayoutConfig,
    theme: Theme,
}

impl<B: Backend> TerminalRenderer<B> {
    pub fn new(terminal: Terminal<B>, layout: LayoutConfig, colors: &ColorConfig) -> Self {
        Self {
            terminal,
            screen: Screen::default(),
            layout,
            theme: Theme::from_config(colors),
        }
    }

    /// Repaint from the cached screen, e.g. after a resize.
    pub fn draw(&mut self) -> io::Result<()> {
        let screen = &self.screen;
        let layout = &self.layout;
        let theme = &self.theme;
        self.terminal.draw(|f| draw(f, screen, layout, theme))?;
        Ok(())
    }
}

impl<B: Backend + Send + 'static> Renderer for TerminalRenderer<B> {
    fn render(&mut self, row: usize, view: &TimerView, highlighted: bool) -> io::Result<()> {
        self.screen.set_row(row, view, highlighted);
        self.draw()
    }

    fn truncate(&mut self, rows: usize) -> io::Result<()> {
        self.screen.truncate(rows);
        self.draw()
    }

    fn show_overlay(&mut self, lines: &[String]) -> io::Result<()> {
        self.screen.overlay = Some(lines.to_vec());
        self.draw()
    }

    fn hide_overlay(&mut self) -> io::Result<()> {
        self.screen.overlay = None;
        self.draw()
    }

    fn show_prompt(&mut self, label: &str, input: &str) -> io::Result<()> {
        self.screen.set_prompt(label, input);
        self.draw()
    }

    fn hide_prompt(&mut self) -> io::Result<()> {
        self.screen.prompt = None;
        self.draw()
    }

    fn show_message(&mut self, message: &str) -> io::Result<()> {
        self.screen.message = Some(message.to_string());
        self.draw()
    }

    fn clear_message(&mut self) -> io::Result<()> {
        if self.screen.message.take().is_none() {
            return Ok(());
        }
        self.draw()
    }
}

pub fn draw(f: &mut Frame, screen: &Screen, layout: &LayoutConfig, theme: &Theme) {
    let area = f.area();

    f.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border)),
        area,
    );

    let prompt_area = prompt_area(area);

    if let Some(lines) = &screen.overlay {
        let overlay_area = Rect::new(
            area.x + 1,
            area.y + 1,
            area.width.saturating_sub(2),
            prompt_area.y.saturating_sub(area.y + 1),
        );
        draw_help_overlay(f, overlay_area, lines, theme);
    } else {
        for (row, entry) in screen.rows.iter().enumerate() {
            let Some((view, highlighted)) = entry else {
                continue;
            };
            if let Some(timer_area) = timer_area(area, layout, row, prompt_area.y) {
                draw_timer(f, timer_area, view, *highlighted, theme);
            }
        }
    }

    draw_prompt_line(f, prompt_area, screen, theme);
}

/// One line on the second-to-last row, inside the border.
fn prompt_area(area: Rect) -> Rect {
    if area.height < 3 {
        return Rect::new(area.x, area.y, 0, 0);
    }
    Rect::new(
        area.x + 1,
        area.bottom() - 2,
        area.width.saturating_sub(2),
        1,
    )
}

/// Box for the timer at 0-based `row`, or `None` when it would overlap the
/// prompt line or fall off screen.
fn timer_area(area: Rect, layout: &LayoutConfig, row: usize, limit: u16) -> Option<Rect> {
    let offset = u16::try_from(row).ok()?.checked_mul(layout.height)?;
    let y = area.y.checked_add(layout.y)?.checked_add(offset)?;
    if y.checked_add(layout.height)? > limit {
        return None;
    }

    let x = area.x.checked_add(layout.x)?;
    let width = layout.width.min(area.right().saturating_sub(x.saturating_add(1)));
    if width < 3 {
        return None;
    }
    Some(Rect::new(x, y, width, layout.height))
}
