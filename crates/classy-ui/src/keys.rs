//! Window-wide key subscriptions.
//!
//! Listeners see every key press before the focused input does, whether or
//! not the input has focus. A listener stays installed exactly as long as its
//! [`KeySubscription`] is alive.

use std::sync::{Arc, Weak};

use crossterm::event::{KeyCode, KeyEvent};
use parking_lot::Mutex;

/// What a listener asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    ClearQuery,
}

type Handler = Box<dyn Fn(&KeyEvent) -> Option<KeyAction> + Send + Sync>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    handlers: Vec<(u64, Handler)>,
}

#[derive(Clone, Default)]
pub struct Keyboard {
    listeners: Arc<Mutex<Listeners>>,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, handler: F) -> KeySubscription
    where
        F: Fn(&KeyEvent) -> Option<KeyAction> + Send + Sync + 'static,
    {
        let mut listeners = self.listeners.lock();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.handlers.push((id, Box::new(handler)));
        tracing::debug!("Key listener {} installed", id);

        KeySubscription {
            id,
            listeners: Arc::downgrade(&self.listeners),
        }
    }

    /// Run every listener against `key`, in subscription order.
    pub fn dispatch(&self, key: &KeyEvent) -> Vec<KeyAction> {
        self.listeners
            .lock()
            .handlers
            .iter()
            .filter_map(|(_, handler)| handler(key))
            .collect()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().handlers.len()
    }
}

/// Removes its listener when dropped.
#[must_use = "dropping the subscription removes the listener immediately"]
pub struct KeySubscription {
    id: u64,
    listeners: Weak<Mutex<Listeners>>,
}

impl Drop for KeySubscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.lock().handlers.retain(|(id, _)| *id != self.id);
            tracing::debug!("Key listener {} removed", self.id);
        }
    }
}

/// Enter clears the search, wherever focus is.
pub fn enter_clears_query(key: &KeyEvent) -> Option<KeyAction> {
    (key.code == KeyCode::Enter).then_some(KeyAction::ClearQuery)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn enter_maps_to_clear() {
        assert_eq!(
            enter_clears_query(&press(KeyCode::Enter)),
            Some(KeyAction::ClearQuery)
        );
        assert_eq!(enter_clears_query(&press(KeyCode::Char('a'))), None);
    }

    #[test]
    fn subscription_dispatches_until_dropped() {
        let keyboard = Keyboard::new();
        let subscription = keyboard.subscribe(enter_clears_query);
        assert_eq!(keyboard.listener_count(), 1);
        assert_eq!(
            keyboard.dispatch(&press(KeyCode::Enter)),
            vec![KeyAction::ClearQuery]
        );

        drop(subscription);
        assert_eq!(keyboard.listener_count(), 0);
        assert!(keyboard.dispatch(&press(KeyCode::Enter)).is_empty());
    }

    #[test]
    fn dropping_one_subscription_keeps_others() {
        let keyboard = Keyboard::new();
        let first = keyboard.subscribe(enter_clears_query);
        let _second = keyboard.subscribe(|key| {
            (key.code == KeyCode::Delete).then_some(KeyAction::ClearQuery)
        });

        drop(first);
        assert_eq!(keyboard.listener_count(), 1);
        assert!(keyboard.dispatch(&press(KeyCode::Enter)).is_empty());
        assert_eq!(keyboard.dispatch(&press(KeyCode::Delete)).len(), 1);
    }

    #[test]
    fn subscription_outliving_keyboard_is_harmless() {
        let keyboard = Keyboard::new();
        let subscription = keyboard.subscribe(enter_clears_query);
        drop(keyboard);
        drop(subscription);
    }
}
