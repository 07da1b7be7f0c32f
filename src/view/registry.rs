//! Explicitly constructed view registry and display stack

use std::collections::HashMap;

use super::{ViewKind, ViewOps};
use crate::core::ViewState;
use crate::error::{Result, RevtreeError};

struct Slot {
    view: Box<dyn ViewOps>,
    state: ViewState,
}

/// Registered views keyed by kind, plus the stack of displayed views
#[derive(Default)]
pub struct ViewRegistry {
    slots: HashMap<ViewKind, Slot>,
    stack: Vec<ViewKind>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a view, replacing (and returning) any view of the same kind
    pub fn register(&mut self, view: Box<dyn ViewOps>) -> Option<Box<dyn ViewOps>> {
        let kind = view.kind();
        tracing::debug!("Registering {} view", kind.name());
        self.slots
            .insert(
                kind,
                Slot {
                    view,
                    state: ViewState::default(),
                },
            )
            .map(|slot| slot.view)
    }

    pub fn contains(&self, kind: ViewKind) -> bool {
        self.slots.contains_key(&kind)
    }

    pub fn get(&self, kind: ViewKind) -> Option<&dyn ViewOps> {
        self.slots.get(&kind).map(|slot| slot.view.as_ref())
    }

    pub fn state(&self, kind: ViewKind) -> Option<&ViewState> {
        self.slots.get(&kind).map(|slot| &slot.state)
    }

    /// Open `kind` and put it on top of the display stack
    pub fn display(&mut self, kind: ViewKind) -> Result<()> {
        let slot = self
            .slots
            .get_mut(&kind)
            .ok_or_else(|| RevtreeError::view(format!("no {} view registered", kind.name())))?;
        slot.view.open(&mut slot.state)?;

        if self.stack.last() != Some(&kind) {
            self.stack.retain(|k| *k != kind);
            self.stack.push(kind);
        }
        Ok(())
    }

    /// Pop the current view; returns `false` when it was the last one
    pub fn close(&mut self) -> bool {
        if self.stack.len() <= 1 {
            return false;
        }
        self.stack.pop();
        true
    }

    pub fn current_kind(&self) -> Option<ViewKind> {
        self.stack.last().copied()
    }

    /// Number of views on the display stack
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn current(&self) -> Option<(&dyn ViewOps, &ViewState)> {
        let kind = self.current_kind()?;
        self.slots
            .get(&kind)
            .map(|slot| (slot.view.as_ref(), &slot.state))
    }

    pub fn current_mut(&mut self) -> Option<(&mut dyn ViewOps, &mut ViewState)> {
        let kind = self.current_kind()?;
        let slot = self.slots.get_mut(&kind)?;
        let view: &mut dyn ViewOps = slot.view.as_mut();
        Some((view, &mut slot.state))
    }
}
