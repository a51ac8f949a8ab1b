//! Single-friend selection with toggle-off on re-select.

use shared::domain::FriendId;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionState {
    #[default]
    NoSelection,
    Selected(FriendId),
}

impl SelectionState {
    pub fn select(&mut self, id: FriendId) -> Option<FriendId> {
        *self = match *self {
            SelectionState::Selected(current) if current == id => SelectionState::NoSelection,
            _ => SelectionState::Selected(id),
        };
        debug!(selection = ?self, "selection changed");
        self.current()
    }

    pub fn clear(&mut self) {
        *self = SelectionState::NoSelection;
    }

    pub fn current(&self) -> Option<FriendId> {
        match self {
            SelectionState::NoSelection => None,
            SelectionState::Selected(id) => Some(*id),
        }
    }

    pub fn is_selected(&self, id: FriendId) -> bool {
        self.current() == Some(id)
    }
}
