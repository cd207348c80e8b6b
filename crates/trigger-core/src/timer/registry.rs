//! Ordered timer registry addressed by 1-based display index

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::{Timer, TimerId};
use crate::{Error, Result};

use super::scheduler::TickHandle;
use super::SharedTimer;

struct Slot {
    id: TimerId,
    timer: SharedTimer,
    ticker: Option<TickHandle>,
}

/// Timers in display order plus the selection cursor.
///
/// Public indices are 1-based; the selection is 0-based and always points at
/// a live slot while the registry is non-empty.
#[derive(Default)]
pub struct TimerRegistry {
    slots: Vec<Slot>,
    selection: Option<usize>,
    next_id: u64,
}

impl TimerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stopped timer and return its 1-based index.
    pub fn append(&mut self, title: impl Into<String>) -> usize {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        let timer = Arc::new(RwLock::new(Timer::new(id, title)));

        self.slots.push(Slot {
            id,
            timer,
            ticker: None,
        });

        if self.selection.is_none() {
            self.selection = Some(0);
        }

        tracing::debug!(%id, index = self.slots.len(), "Timer appended");
        self.slots.len()
    }

    /// Remove the timer at `index`, cancelling its tick driver first.
    pub fn remove_at(&mut self, index: usize) -> Result<SharedTimer> {
        let position = self.position(index)?;

        if let Some(ticker) = self.slots[position].ticker.take() {
            ticker.cancel();
        }
        let slot = self.slots.remove(position);

        self.selection = match self.slots.len() {
            0 => None,
            len => self.selection.map(|s| s.min(len - 1)),
        };

        tracing::debug!(id = %slot.id, index, "Timer removed");
        Ok(slot.timer)
    }

    pub fn get(&self, index: usize) -> Result<SharedTimer> {
        let position = self.position(index)?;
        Ok(self.slots[position].timer.clone())
    }

    pub fn id_at(&self, index: usize) -> Result<TimerId> {
        let position = self.position(index)?;
        Ok(self.slots[position].id)
    }

    pub async fn rename(&self, index: usize, title: impl Into<String>) -> Result<()> {
        let timer = self.get(index)?;
        timer.write().await.title = title.into();
        Ok(())
    }

    /// Hand the tick driver for the timer at `index` to the registry, which
    /// cancels it on removal.
    pub fn attach_ticker(&mut self, index: usize, ticker: TickHandle) -> Result<()> {
        let position = self.position(index)?;
        if let Some(previous) = self.slots[position].ticker.replace(ticker) {
            previous.cancel();
        }
        Ok(())
    }

    pub fn move_selection(&mut self, delta: isize) {
        let Some(current) = self.selection else {
            return;
        };
        let last = self.slots.len() - 1;
        let target = current.saturating_add_signed(delta).min(last);
        self.selection = Some(target);
    }

    /// 0-based selected position.
    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    /// 1-based index of the selected timer.
    pub fn selected_index(&self) -> Option<usize> {
        self.selection.map(|s| s + 1)
    }

    /// 0-based row currently holding timer `id`.
    pub fn position_of(&self, id: TimerId) -> Option<usize> {
        self.slots.iter().position(|slot| slot.id == id)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Timers in display order.
    pub fn iter(&self) -> impl Iterator<Item = &SharedTimer> {
        self.slots.iter().map(|slot| &slot.timer)
    }

    /// Drop every timer and cancel every tick driver.
    pub fn clear(&mut self) {
        for slot in &self.slots {
            if let Some(ticker) = &slot.ticker {
                ticker.cancel();
            }
        }
        self.slots.clear();
        self.selection = None;
    }

    fn position(&self, index: usize) -> Result<usize> {
        if index == 0 || index > self.slots.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.slots.len(),
            });
        }
        Ok(index - 1)
    }
}
