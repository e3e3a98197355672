//! Observer registration for state changes.
//!
//! Each transition is published once, to every registered observer, in the
//! order the transitions happened. Observers are called synchronously on
//! the thread that mutated the engine.

use crate::game::state::GameState;

/// What caused a state change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// The human claimed `index`.
    HumanMove { index: usize },
    /// The opponent strategy claimed `index`.
    SystemMove { index: usize },
    /// The turn was handed over without a move.
    TurnAdvanced,
    /// Same size, empty board.
    Reset,
    /// New size, empty board.
    Resized { size: usize },
    /// State replaced from a saved game.
    Restored,
}

/// A published state change: the cause and the resulting snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateChange {
    pub transition: Transition,
    pub state: GameState,
}

/// Callback invoked for every state change.
pub type Observer = Box<dyn FnMut(&StateChange) + Send>;

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Registered observers in subscription order.
#[derive(Default)]
pub(crate) struct Observers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Observer)>,
}

impl Observers {
    pub(crate) fn subscribe(&mut self, observer: Observer) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn publish(&mut self, change: &StateChange) {
        for (_, observer) in &mut self.entries {
            observer(change);
        }
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.entries.len())
            .finish()
    }
}
