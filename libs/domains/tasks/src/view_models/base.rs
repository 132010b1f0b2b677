use std::future::Future;
use std::sync::Mutex;
use tokio::task::{AbortHandle, JoinHandle};

use crate::live_data::{LiveData, SingleLiveEvent};
use crate::messages::Message;

/// Background work started on behalf of a screen
///
/// Every spawned task is aborted when the scope is disposed or dropped, so a
/// torn-down screen never receives late results.
#[derive(Debug, Default)]
pub struct TaskScope {
    handles: Mutex<Vec<AbortHandle>>,
}

impl TaskScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a task tracked by this scope
    pub fn spawn<F>(&self, future: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        let handle = tokio::spawn(future);
        let mut handles = self.handles.lock().unwrap_or_else(|e| e.into_inner());
        handles.retain(|h| !h.is_finished());
        handles.push(handle.abort_handle());
        handle
    }

    /// Number of tracked tasks that are still running
    pub fn active(&self) -> usize {
        let handles = self.handles.lock().unwrap_or_else(|e| e.into_inner());
        handles.iter().filter(|h| !h.is_finished()).count()
    }

    /// Abort every tracked task
    pub fn dispose(&self) {
        let mut handles = self.handles.lock().unwrap_or_else(|e| e.into_inner());
        for handle in handles.drain(..) {
            handle.abort();
        }
    }
}

impl Drop for TaskScope {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// State every screen shares: a loading flag and toasts
///
/// Lives inside the screen state that background tasks hold on to; the
/// screen's [`TaskScope`] stays with the view-model itself, so dropping the
/// view-model aborts that work.
#[derive(Debug)]
pub struct BaseViewModel {
    data_loading: LiveData<bool>,
    toast: SingleLiveEvent<Message>,
}

impl BaseViewModel {
    pub fn new() -> Self {
        Self {
            data_loading: LiveData::new(false),
            toast: SingleLiveEvent::new(),
        }
    }

    pub fn data_loading(&self) -> &LiveData<bool> {
        &self.data_loading
    }

    pub fn is_loading(&self) -> bool {
        self.data_loading.value()
    }

    pub fn toast(&self) -> &SingleLiveEvent<Message> {
        &self.toast
    }

    pub fn show_toast(&self, message: Message) {
        self.toast.emit(message);
    }

    pub(crate) fn set_loading(&self, loading: bool) {
        self.data_loading.set_value(loading);
    }
}

impl Default for BaseViewModel {
    fn default() -> Self {
        Self::new()
    }
}
