use serde::{Deserialize, Serialize};

/// Outcome of a non-critical list fetch, kept distinct so "no items" and
/// "could not load" render differently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ListState<T> {
    Pending,
    Loaded(Vec<T>),
    Empty,
    Failed(String),
}

impl<T> ListState<T> {
    pub fn from_items(items: Vec<T>) -> Self {
        if items.is_empty() {
            ListState::Empty
        } else {
            ListState::Loaded(items)
        }
    }

    pub fn from_result<E: std::fmt::Display>(result: Result<Vec<T>, E>) -> Self {
        match result {
            Ok(items) => Self::from_items(items),
            Err(e) => ListState::Failed(e.to_string()),
        }
    }

    /// Loaded items; every other state yields an empty slice.
    pub fn items(&self) -> &[T] {
        match self {
            ListState::Loaded(items) => items,
            _ => &[],
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ListState::Pending)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ListState::Failed(_))
    }
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        ListState::Pending
    }
}
