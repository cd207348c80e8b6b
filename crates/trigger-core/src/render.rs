//! The drawing surface the core talks to

use std::io;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::models::Timer;

/// Everything a renderer needs to draw one timer row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerView {
    /// 1-based display index.
    pub index: usize,
    pub title: String,
    pub elapsed: String,
    pub running: bool,
}

impl TimerView {
    /// Snapshot `timer` for drawing at 0-based `row`.
    pub fn capture(row: usize, timer: &Timer) -> Self {
        Self {
            index: row + 1,
            title: timer.title.clone(),
            elapsed: timer.format_elapsed(),
            running: timer.is_running(),
        }
    }

    pub fn heading(&self) -> String {
        format!("[{}] {}", self.index, self.title)
    }

    pub fn status_line(&self) -> String {
        if self.running {
            self.elapsed.clone()
        } else {
            format!("{} [Paused]", self.elapsed)
        }
    }
}

/// Screen primitives implemented outside the core.
pub trait Renderer: Send + 'static {
    /// Draw one timer at 0-based `row`.
    fn render(&mut self, row: usize, view: &TimerView, highlighted: bool) -> io::Result<()>;

    /// Forget rows at or past `rows`.
    fn truncate(&mut self, rows: usize) -> io::Result<()>;

    fn show_overlay(&mut self, lines: &[String]) -> io::Result<()>;

    fn hide_overlay(&mut self) -> io::Result<()>;

    fn show_prompt(&mut self, label: &str, input: &str) -> io::Result<()>;

    fn hide_prompt(&mut self) -> io::Result<()>;

    fn show_message(&mut self, message: &str) -> io::Result<()>;

    fn clear_message(&mut self) -> io::Result<()>;
}

/// Serializes access to a [`Renderer`] and suppresses timer rows while an
/// overlay covers them.
pub struct Display<R> {
    renderer: R,
    overlay: bool,
}

impl<R: Renderer> Display<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            overlay: false,
        }
    }

    pub fn overlay_active(&self) -> bool {
        self.overlay
    }

    pub fn draw_timer(&mut self, row: usize, view: &TimerView, highlighted: bool) -> io::Result<()> {
        if self.overlay {
            return Ok(());
        }
        self.renderer.render(row, view, highlighted)
    }

    pub fn truncate(&mut self, rows: usize) -> io::Result<()> {
        self.renderer.truncate(rows)
    }

    pub fn show_overlay(&mut self, lines: &[String]) -> io::Result<()> {
        self.overlay = true;
        self.renderer.show_overlay(lines)
    }

    pub fn hide_overlay(&mut self) -> io::Result<()> {
        self.overlay = false;
        self.renderer.hide_overlay()
    }

    pub fn show_prompt(&mut self, label: &str, input: &str) -> io::Result<()> {
        self.renderer.show_prompt(label, input)
    }

    pub fn hide_prompt(&mut self) -> io::Result<()> {
        self.renderer.hide_prompt()
    }

    pub fn show_message(&mut self, message: &str) -> io::Result<()> {
        self.renderer.show_message(message)
    }

    pub fn clear_message(&mut self) -> io::Result<()> {
        self.renderer.clear_message()
    }
}

/// What is on screen: timer rows, overlay, prompt line and message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Screen {
    pub rows: Vec<Option<(TimerView, bool)>>,
    pub overlay: Option<Vec<String>>,
    pub prompt: Option<(String, String)>,
    pub message: Option<String>,
}

impl Screen {
    pub fn set_row(&mut self, row: usize, view: &TimerView, highlighted: bool) {
        if self.rows.len() <= row {
            self.rows.resize(row + 1, None);
        }
        self.rows[row] = Some((view.clone(), highlighted));
    }

    pub fn truncate(&mut self, rows: usize) {
        self.rows.truncate(rows);
    }

    pub fn set_prompt(&mut self, label: &str, input: &str) {
        self.prompt = Some((label.to_string(), input.to_string()));
        self.message = None;
    }

    pub fn row(&self, row: usize) -> Option<&TimerView> {
        self.rows.get(row).and_then(|r| r.as_ref()).map(|(view, _)| view)
    }

    pub fn highlighted_row(&self) -> Option<usize> {
        self.rows
            .iter()
            .position(|r| matches!(r, Some((_, true))))
    }
}

#[derive(Debug, Default)]
struct Recording {
    screen: Screen,
    history: Vec<(usize, TimerView)>,
}

/// Headless renderer that keeps the screen in memory and records every row
/// draw. Clones share the same state, so a caller can keep one to inspect
/// what a session drew.
#[derive(Debug, Clone, Default)]
pub struct MemoryRenderer {
    recording: Arc<Mutex<Recording>>,
}

impl MemoryRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> Screen {
        self.lock().screen.clone()
    }

    /// Every row draw, oldest first.
    pub fn history(&self) -> Vec<(usize, TimerView)> {
        self.lock().history.clone()
    }

    /// Number of row draws so far for a timer titled `title`.
    pub fn draws_of(&self, title: &str) -> usize {
        self.lock()
            .history
            .iter()
            .filter(|(_, view)| view.title == title)
            .count()
    }

    fn lock(&self) -> MutexGuard<'_, Recording> {
        self.recording.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Renderer for MemoryRenderer {
    fn render(&mut self, row: usize, view: &TimerView, highlighted: bool) -> io::Result<()> {
        let mut recording = self.lock();
        recording.screen.set_row(row, view, highlighted);
        recording.history.push((row, view.clone()));
        Ok(())
    }

    fn truncate(&mut self, rows: usize) -> io::Result<()> {
        self.lock().screen.truncate(rows);
        Ok(())
    }

    fn show_overlay(&mut self, lines: &[String]) -> io::Result<()> {
        self.lock().screen.overlay = Some(lines.to_vec());
        Ok(())
    }

    fn hide_overlay(&mut self) -> io::Result<()> {
        self.lock().screen.overlay = None;
        Ok(())
    }

    fn show_prompt(&mut self, label: &str, input: &str) -> io::Result<()> {
        self.lock().screen.set_prompt(label, input);
        Ok(())
    }

    fn hide_prompt(&mut self) -> io::Result<()> {
        self.lock().screen.prompt = None;
        Ok(())
    }

    fn show_message(&mut self, message: &str) -> io::Result<()> {
        self.lock().screen.message = Some(message.to_string());
        Ok(())
    }

    fn clear_message(&mut self) -> io::Result<()> {
        self.lock().screen.message = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimerId;

    #[test]
    fn test_view_lines() {
        let mut timer = Timer::new(TimerId(7), "Lunch");
        timer.add_time(62);

        let view = TimerView::capture(1, &timer);
        assert_eq!(view.index, 2);
        assert_eq!(view.heading(), "[2] Lunch");
        assert_eq!(view.status_line(), "00:01:02 [Paused]");

        timer.start();
        let view = TimerView::capture(0, &timer);
        assert_eq!(view.status_line(), "00:01:02");
    }

    #[test]
    fn test_display_suppresses_rows_under_overlay() {
        let renderer = MemoryRenderer::new();
        let mut display = Display::new(renderer.clone());
        let view = TimerView::capture(0, &Timer::new(TimerId(1), "a"));

        display.show_overlay(&["Help".to_string()]).unwrap();
        display.draw_timer(0, &view, false).unwrap();
        assert!(renderer.history().is_empty());
        assert!(display.overlay_active());

        display.hide_overlay().unwrap();
        display.draw_timer(0, &view, true).unwrap();
        let screen = renderer.screen();
        assert_eq!(renderer.history().len(), 1);
        assert_eq!(screen.highlighted_row(), Some(0));
        assert_eq!(screen.overlay, None);
    }

    #[test]
    fn test_memory_renderer_truncate() {
        let mut renderer = MemoryRenderer::new();
        let view = TimerView::capture(2, &Timer::new(TimerId(3), "c"));

        renderer.render(2, &view, false).unwrap();
        assert_eq!(renderer.screen().rows.len(), 3);
        assert_eq!(renderer.screen().row(2), Some(&view));

        renderer.truncate(1).unwrap();
        assert_eq!(renderer.screen().rows.len(), 1);
        assert_eq!(renderer.screen().row(2), None);
    }
}
