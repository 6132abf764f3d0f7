//! A cart state owner that runs actions and notifies subscribers.

use core::fmt;

use super::reducer::{CartAction, reduce};
use super::state::CartState;

type Listener = Box<dyn Fn(&CartState, &CartAction) + Send + Sync>;

/// Handle returned by [`CartStore::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Owns a [`CartState`] and is the single writer for it.
///
/// Each [`dispatch`](Self::dispatch) runs the reducer to completion and then
/// calls every subscriber with the new state and the action that produced it,
/// in subscription order.
#[derive(Default)]
pub struct CartStore {
    state: CartState,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl CartStore {
    /// Create a store with an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store around an existing cart, e.g. one loaded from a session.
    #[must_use]
    pub fn with_state(state: CartState) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn state(&self) -> &CartState {
        &self.state
    }

    /// Apply an action, notify subscribers and return the new state.
    pub fn dispatch(&mut self, action: CartAction) -> &CartState {
        let previous = std::mem::take(&mut self.state);
        self.state = reduce(previous, &action);
        for (_, listener) in &self.listeners {
            listener(&self.state, &action);
        }
        &self.state
    }

    /// Register a callback run after every dispatch.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&CartState, &CartAction) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a subscriber. Returns `false` if it was already removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    /// Consume the store, keeping only the state.
    #[must_use]
    pub fn into_state(self) -> CartState {
        self.state
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
