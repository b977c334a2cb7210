//! Shopping Session
//!
//! Two-state machine: Browsing and Shopping. Shopping can only start with a
//! non-empty selection. While shopping, the moment the selection becomes empty
//! the session completes: it drops back to Browsing and raises a one-shot
//! notice that stays pending until acknowledged.

use log::info;

use crate::domain::{DomainError, DomainResult, SelectionSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Browsing,
    Shopping,
}

/// What a selection change did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Unchanged,
    /// Selection emptied while shopping
    Completed,
}

#[derive(Debug, Default)]
pub struct ShoppingSession {
    state: SessionState,
    notice_pending: bool,
}

impl ShoppingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_shopping(&self) -> bool {
        self.state == SessionState::Shopping
    }

    /// Whether "begin shopping" is offered
    pub fn can_begin(&self, selection: &SelectionSet) -> bool {
        self.state == SessionState::Browsing && !selection.is_empty()
    }

    /// Browsing -> Shopping. Refused with an empty selection.
    pub fn begin(&mut self, selection: &SelectionSet) -> DomainResult<()> {
        match self.state {
            SessionState::Shopping => Ok(()),
            SessionState::Browsing if selection.is_empty() => Err(DomainError::validation(
                "cannot begin shopping with no items selected",
            )),
            SessionState::Browsing => {
                self.state = SessionState::Shopping;
                info!("Shopping started with {} selected items", selection.len());
                Ok(())
            }
        }
    }

    /// Shopping -> Browsing ("go back"). No notice.
    pub fn end(&mut self) -> DomainResult<()> {
        if !self.exit() {
            return Err(DomainError::validation("not shopping"));
        }
        Ok(())
    }

    /// Leave shopping mode if active. Returns `true` if the state changed.
    pub fn exit(&mut self) -> bool {
        let was_shopping = self.is_shopping();
        self.state = SessionState::Browsing;
        was_shopping
    }

    /// Feed the current selection after any change to it
    pub fn observe(&mut self, selection: &SelectionSet) -> Transition {
        if self.is_shopping() && selection.is_empty() {
            self.state = SessionState::Browsing;
            self.notice_pending = true;
            info!("Shopping complete");
            Transition::Completed
        } else {
            Transition::Unchanged
        }
    }

    pub fn notice_pending(&self) -> bool {
        self.notice_pending
    }

    /// Dismiss the completion notice. Returns `true` if one was pending.
    pub fn acknowledge(&mut self) -> bool {
        std::mem::take(&mut self.notice_pending)
    }
}
