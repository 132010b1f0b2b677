//! Observable state for view-models
//!
//! `LiveData` holds the current value of a piece of screen state and notifies
//! subscribers on change. `SingleLiveEvent` carries one-shot signals
//! (navigation, toasts) that must be acted on at most once, even when a view
//! re-subscribes after being rebuilt.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::watch;

/// Observable value backed by a `tokio::sync::watch` channel
#[derive(Debug)]
pub struct LiveData<T> {
    sender: watch::Sender<T>,
}

impl<T: Clone> LiveData<T> {
    pub fn new(value: T) -> Self {
        let (sender, _) = watch::channel(value);
        Self { sender }
    }

    /// Snapshot of the current value
    pub fn value(&self) -> T {
        self.sender.borrow().clone()
    }

    /// Replace the value and notify subscribers
    pub fn set_value(&self, value: T) {
        self.sender.send_replace(value);
    }

    /// Mutate the value in place and notify subscribers
    pub fn update(&self, modify: impl FnOnce(&mut T)) {
        self.sender.send_modify(modify);
    }

    /// Receiver that starts at the current value and sees every later change
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.sender.subscribe()
    }
}

impl<T: Clone + Default> Default for LiveData<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// A value that can be consumed once
#[derive(Debug)]
pub struct Event<T> {
    content: T,
    handled: AtomicBool,
}

impl<T> Event<T> {
    pub fn new(content: T) -> Self {
        Self {
            content,
            handled: AtomicBool::new(false),
        }
    }

    /// The content, unless someone already consumed it
    pub fn get_content_if_not_handled(&self) -> Option<&T> {
        if self.handled.swap(true, Ordering::AcqRel) {
            None
        } else {
            Some(&self.content)
        }
    }

    /// The content, whether or not it has been consumed
    pub fn peek_content(&self) -> &T {
        &self.content
    }

    pub fn has_been_handled(&self) -> bool {
        self.handled.load(Ordering::Acquire)
    }
}

/// Observable slot holding the latest one-shot event
#[derive(Debug)]
pub struct SingleLiveEvent<T> {
    latest: LiveData<Option<Arc<Event<T>>>>,
}

impl<T> SingleLiveEvent<T> {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            latest: LiveData { sender },
        }
    }

    pub fn emit(&self, content: T) {
        self.latest.sender.send_replace(Some(Arc::new(Event::new(content))));
    }

    /// Latest emitted event, consumed or not
    pub fn latest(&self) -> Option<Arc<Event<T>>> {
        self.latest.sender.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<Event<T>>>> {
        self.latest.sender.subscribe()
    }
}

impl<T: Clone> SingleLiveEvent<T> {
    /// Consume the latest event, if it has not been consumed yet
    pub fn take(&self) -> Option<T> {
        self.latest()
            .and_then(|event| event.get_content_if_not_handled().cloned())
    }
}

impl<T> Default for SingleLiveEvent<T> {
    fn default() -> Self {
        Self::new()
    }
}
