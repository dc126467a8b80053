//! Page script start/end hooks.
//!
//! Handlers dispatch a [`ScriptEvent`] when a protected page starts (after
//! the identity check passed) and when it is about to render. Listeners are
//! registered on [`ScriptHooks`] at startup and shared through application
//! state.

use crate::domain::entities::Role;
use std::sync::Arc;

/// Lifecycle point of a page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptEvent {
    Start { role: Role, page: &'static str },
    End { role: Role, page: &'static str },
}

/// Receives script events.
pub trait ScriptListener: Send + Sync {
    fn on_event(&self, event: &ScriptEvent);
}

/// Logs every event at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingListener;

impl ScriptListener for TracingListener {
    fn on_event(&self, event: &ScriptEvent) {
        match event {
            ScriptEvent::Start { role, page } => {
                tracing::debug!(role = role.as_admin_type(), page, "Script start");
            }
            ScriptEvent::End { role, page } => {
                tracing::debug!(role = role.as_admin_type(), page, "Script end");
            }
        }
    }
}

/// Ordered list of listeners; events are delivered in registration order.
#[derive(Default, Clone)]
pub struct ScriptHooks {
    listeners: Vec<Arc<dyn ScriptListener>>,
}

impl ScriptHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hooks with the [`TracingListener`] installed.
    pub fn with_tracing() -> Self {
        Self::new().with_listener(Arc::new(TracingListener))
    }

    pub fn with_listener(mut self, listener: Arc<dyn ScriptListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    pub fn dispatch(&self, event: ScriptEvent) {
        for listener in &self.listeners {
            listener.on_event(&event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}
