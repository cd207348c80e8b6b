//! Interactive command session: turns key presses into registry mutations

use std::sync::{Arc, Weak};
use tokio::sync::{Mutex, RwLock};

use crate::duration::parse_duration;
use crate::models::{CommandMode, Config, Timer, TimerId};
use crate::render::{Display, Renderer, TimerView};
use crate::timer::{SharedTimer, TickScheduler, TimerRegistry};
use crate::{Error, Result};

use super::help::help_lines;
use super::parser::{parse_command, Command};

/// Input events the session understands, independent of the terminal backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Esc,
    Up,
    Down,
    PageUp,
    PageDown,
}

/// What the text in an open prompt will be used for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    /// Explicit mode `:` line.
    CommandLine,
    NewTitle,
    Rename { index: usize },
    AddTime { index: usize },
    SubtractTime { index: usize },
    Confirm(Command),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    Idle,
    Prompting { prompt: Prompt, input: String },
    Help { scroll: usize },
}

impl Prompt {
    pub fn label(&self) -> String {
        match self {
            Prompt::CommandLine => ":".to_string(),
            Prompt::NewTitle => "Title: ".to_string(),
            Prompt::Rename { index } => format!("Title of [{}]: ", index),
            Prompt::AddTime { index } => format!("Add to [{}]: ", index),
            Prompt::SubtractTime { index } => format!("Subtract from [{}]: ", index),
            Prompt::Confirm(Command::Reset { index: Some(index) }) => {
                format!("Reset timer [{}]? (y/N) ", index)
            }
            Prompt::Confirm(Command::Delete { index: Some(index) }) => {
                format!("Delete timer [{}]? (y/N) ", index)
            }
            Prompt::Confirm(Command::Quit) => "Quit? (y/N) ".to_string(),
            Prompt::Confirm(command) => format!("{}? (y/N) ", command.label()),
        }
    }
}

/// One interactive session: the registry, the selection cursor, the prompt
/// and help state, and the tick drivers that keep rows fresh.
pub struct Session<R: Renderer> {
    mode: CommandMode,
    prompt_width: usize,
    registry: Arc<RwLock<TimerRegistry>>,
    display: Arc<Mutex<Display<R>>>,
    scheduler: TickScheduler,
    state: State,
    quit: bool,
}

impl<R: Renderer> Session<R> {
    pub fn new(config: &Config, renderer: R) -> Self {
        Self {
            mode: config.command_mode,
            prompt_width: config.prompt_width,
            registry: Arc::new(RwLock::new(TimerRegistry::new())),
            display: Arc::new(Mutex::new(Display::new(renderer))),
            scheduler: TickScheduler::new(config.tick_interval()),
            state: State::Idle,
            quit: false,
        }
    }

    pub fn mode(&self) -> CommandMode {
        self.mode
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn registry(&self) -> Arc<RwLock<TimerRegistry>> {
        self.registry.clone()
    }

    /// Snapshot of the timer at 1-based `index`.
    pub async fn timer(&self, index: usize) -> Result<Timer> {
        let timer = self.registry.read().await.get(index)?;
        let snapshot = timer.read().await.clone();
        Ok(snapshot)
    }

    /// Feed one key press. Command errors are shown to the user, not returned;
    /// only drawing failures come back as `Err`.
    pub async fn handle_key(&mut self, key: Key) -> Result<()> {
        let state = std::mem::replace(&mut self.state, State::Idle);
        match state {
            State::Idle => self.handle_idle_key(key).await,
            State::Prompting { prompt, input } => self.handle_prompt_key(prompt, input, key).await,
            State::Help { scroll } => self.handle_help_key(scroll, key).await,
        }
    }

    /// Parse and apply an explicit-mode command line without confirmation.
    pub async fn execute(&mut self, line: &str) -> Result<()> {
        let command = parse_command(line)?;
        self.apply(command).await
    }

    /// Apply `command` immediately. A missing index means the selected timer.
    pub async fn apply(&mut self, command: Command) -> Result<()> {
        tracing::debug!(?command, "Applying command");

        match command {
            Command::New { title } => {
                self.new_timer(title).await?;
            }
            Command::Rename { index, title } => {
                let index = self.resolve_index(index).await?;
                self.registry.read().await.rename(index, title).await?;
            }
            Command::AddTime { index, seconds } => {
                self.with_timer(index, |timer| timer.add_time(seconds)).await?;
            }
            Command::SubtractTime { index, seconds } => {
                self.with_timer(index, |timer| timer.subtract_time(seconds)).await?;
            }
            Command::Toggle { index } => {
                self.with_timer(index, Timer::toggle).await?;
            }
            Command::Reset { index } => {
                self.with_timer(index, Timer::reset).await?;
            }
            Command::Delete { index } => {
                let index = self.resolve_index(index).await?;
                self.registry.write().await.remove_at(index)?;
                tracing::info!(index, "Timer deleted");
            }
            Command::Help => {
                return self.open_help().await;
            }
            Command::Quit => {
                self.registry.write().await.clear();
                self.quit = true;
                tracing::info!("Session quit");
                return Ok(());
            }
        }

        self.redraw().await
    }

    /// Draw every timer row and drop rows past the end.
    pub async fn redraw(&self) -> Result<()> {
        let registry = self.registry.read().await;
        let selection = registry.selection();

        let mut views = Vec::with_capacity(registry.len());
        for (row, timer) in registry.iter().enumerate() {
            views.push(TimerView::capture(row, &*timer.read().await));
        }

        let mut display = self.display.lock().await;
        for (row, view) in views.iter().enumerate() {
            display.draw_timer(row, view, selection == Some(row))?;
        }
        display.truncate(views.len())?;
        Ok(())
    }

    async fn handle_idle_key(&mut self, key: Key) -> Result<()> {
        match key {
            Key::Down | Key::Char('j') => return self.move_selection(1).await,
            Key::Up | Key::Char('k') => return self.move_selection(-1).await,
            _ => {}
        }

        match self.mode {
            CommandMode::Explicit => match key {
                Key::Char(':') => self.open_prompt(Prompt::CommandLine, String::new()).await,
                _ => Ok(()),
            },
            CommandMode::Implicit => match key {
                Key::Char('n') => self.open_prompt(Prompt::NewTitle, String::new()).await,
                Key::Char('e') => match self.resolve_index(None).await {
                    Ok(index) => {
                        let title = self.timer(index).await?.title;
                        self.open_prompt(Prompt::Rename { index }, title).await
                    }
                    Err(e) => self.report("Edit", e).await,
                },
                Key::Char('a') => match self.resolve_index(None).await {
                    Ok(index) => self.open_prompt(Prompt::AddTime { index }, String::new()).await,
                    Err(e) => self.report("Add", e).await,
                },
                Key::Char('s') => match self.resolve_index(None).await {
                    Ok(index) => {
                        self.open_prompt(Prompt::SubtractTime { index }, String::new())
                            .await
                    }
                    Err(e) => self.report("Subtract", e).await,
                },
                Key::Char('p') => self.dispatch(Command::Toggle { index: None }).await,
                Key::Char('r') => self.dispatch(Command::Reset { index: None }).await,
                Key::Char('d') => self.dispatch(Command::Delete { index: None }).await,
                Key::Char('h') => self.dispatch(Command::Help).await,
                Key::Char('q') => self.dispatch(Command::Quit).await,
                Key::Char(c) => {
                    self.report("Command", Error::UnrecognizedCommand(c.to_string()))
                        .await
                }
                _ => Ok(()),
            },
        }
    }

    async fn handle_prompt_key(&mut self, prompt: Prompt, mut input: String, key: Key) -> Result<()> {
        match key {
            Key::Enter => {
                self.display.lock().await.hide_prompt()?;
                self.submit_prompt(prompt, input).await
            }
            Key::Esc => {
                self.display.lock().await.hide_prompt()?;
                Ok(())
            }
            Key::Backspace => {
                input.pop();
                self.open_prompt(prompt, input).await
            }
            Key::Char(c) => {
                if input.chars().count() < self.prompt_width {
                    input.push(c);
                }
                self.open_prompt(prompt, input).await
            }
            _ => {
                self.state = State::Prompting { prompt, input };
                Ok(())
            }
        }
    }

    async fn handle_help_key(&mut self, scroll: usize, key: Key) -> Result<()> {
        let last = help_lines(self.mode).len().saturating_sub(1);
        let scroll = match key {
            Key::Char('q') | Key::Esc => return self.close_help().await,
            Key::Down | Key::Char('j') => (scroll + 1).min(last),
            Key::Up | Key::Char('k') => scroll.saturating_sub(1),
            Key::PageDown => (scroll + 10).min(last),
            Key::PageUp => scroll.saturating_sub(10),
            _ => {
                self.state = State::Help { scroll };
                return Ok(());
            }
        };

        self.state = State::Help { scroll };
        let lines = help_lines(self.mode);
        self.display.lock().await.show_overlay(&lines[scroll..])?;
        Ok(())
    }

    async fn submit_prompt(&mut self, prompt: Prompt, input: String) -> Result<()> {
        match prompt {
            Prompt::CommandLine => {
                if input.trim().is_empty() {
                    return Ok(());
                }
                match parse_command(&input) {
                    Ok(command) => self.dispatch(command).await,
                    Err(e) => self.report("Command", e).await,
                }
            }
            Prompt::NewTitle => {
                self.dispatch(Command::New {
                    title: input.trim().to_string(),
                })
                .await
            }
            Prompt::Rename { index } => {
                self.dispatch(Command::Rename {
                    index: Some(index),
                    title: input,
                })
                .await
            }
            Prompt::AddTime { index } => {
                self.dispatch(Command::AddTime {
                    index: Some(index),
                    seconds: parse_duration(&input),
                })
                .await
            }
            Prompt::SubtractTime { index } => {
                self.dispatch(Command::SubtractTime {
                    index: Some(index),
                    seconds: parse_duration(&input),
                })
                .await
            }
            Prompt::Confirm(command) => {
                if input.trim().eq_ignore_ascii_case("y") {
                    self.run(command).await
                } else {
                    self.display.lock().await.show_message("Cancelled.")?;
                    Ok(())
                }
            }
        }
    }

    /// Validate the target, ask for confirmation when needed, then run.
    async fn dispatch(&mut self, command: Command) -> Result<()> {
        let label = command.label();
        let command = match self.resolve(command).await {
            Ok(command) => command,
            Err(e) => return self.report(label, e).await,
        };

        if command.needs_confirmation() {
            return self.open_prompt(Prompt::Confirm(command), String::new()).await;
        }

        self.run(command).await
    }

    async fn run(&mut self, command: Command) -> Result<()> {
        let label = command.label();
        match self.apply(command).await {
            Err(e) => self.report(label, e).await,
            Ok(()) => self.display.lock().await.clear_message().map_err(Error::from),
        }
    }

    /// Pin a command's target to a concrete 1-based index.
    async fn resolve(&self, command: Command) -> Result<Command> {
        match command.target() {
            Some(index) => {
                let index = self.resolve_index(index).await?;
                Ok(command.with_index(index))
            }
            None => Ok(command),
        }
    }

    async fn resolve_index(&self, index: Option<usize>) -> Result<usize> {
        let registry = self.registry.read().await;
        if registry.is_empty() {
            return Err(Error::NoTimers);
        }
        match index {
            Some(index) => registry.get(index).map(|_| index),
            None => registry.selected_index().ok_or(Error::NoTimers),
        }
    }

    async fn with_timer<F>(&self, index: Option<usize>, f: F) -> Result<()>
    where
        F: FnOnce(&mut Timer),
    {
        let index = self.resolve_index(index).await?;
        let timer = self.registry.read().await.get(index)?;
        f(&mut *timer.write().await);
        Ok(())
    }

    async fn new_timer(&mut self, title: String) -> Result<usize> {
        let mut registry = self.registry.write().await;
        let index = registry.append(title);
        let id = registry.id_at(index)?;
        let timer = registry.get(index)?;
        timer.write().await.start();

        let weak_registry = Arc::downgrade(&self.registry);
        let display = self.display.clone();
        let ticker = self.scheduler.subscribe(timer, move |timer| {
            let registry = weak_registry.clone();
            let display = display.clone();
            async move { draw_tick(id, timer, registry, display).await }
        });
        registry.attach_ticker(index, ticker)?;

        tracing::info!(%id, index, "Timer created");
        Ok(index)
    }

    async fn move_selection(&mut self, delta: isize) -> Result<()> {
        self.registry.write().await.move_selection(delta);
        self.display.lock().await.clear_message()?;
        self.redraw().await
    }

    async fn open_prompt(&mut self, prompt: Prompt, input: String) -> Result<()> {
        self.display
            .lock()
            .await
            .show_prompt(&prompt.label(), &input)?;
        self.state = State::Prompting { prompt, input };
        Ok(())
    }

    async fn open_help(&mut self) -> Result<()> {
        let lines = help_lines(self.mode);
        self.display.lock().await.show_overlay(&lines)?;
        self.state = State::Help { scroll: 0 };
        Ok(())
    }

    async fn close_help(&mut self) -> Result<()> {
        self.display.lock().await.hide_overlay()?;
        self.state = State::Idle;
        self.redraw().await
    }

    /// Show a recoverable command error; anything else is passed up.
    async fn report(&mut self, label: &str, error: Error) -> Result<()> {
        if !error.is_recoverable() {
            return Err(error);
        }
        tracing::info!(%error, "{} rejected", label);
        self.display
            .lock()
            .await
            .show_message(&format!("{}: {}.", label, error))?;
        Ok(())
    }
}

/// Redraw one timer from its tick driver. The row is looked up under the
/// registry lock, so a timer that has been deleted is never drawn.
async fn draw_tick<R: Renderer>(
    id: TimerId,
    timer: SharedTimer,
    registry: Weak<RwLock<TimerRegistry>>,
    display: Arc<Mutex<Display<R>>>,
) {
    let Some(registry) = registry.upgrade() else {
        return;
    };
    let registry = registry.read().await;
    let Some(row) = registry.position_of(id) else {
        return;
    };
    let highlighted = registry.selection() == Some(row);
    let view = TimerView::capture(row, &*timer.read().await);

    let mut display = display.lock().await;
    if let Err(e) = display.draw_timer(row, &view, highlighted) {
        tracing::warn!(%id, "Failed to draw tick: {}", e);
    }
}
