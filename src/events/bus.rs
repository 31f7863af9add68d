use std::collections::VecDeque;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use tracing::{debug, error, info};

use super::ActionEvent;

/// Game-side receiver of action events
pub trait ActionListener: Send + Sync {
    fn on_action_triggered(&self, event: &ActionEvent) -> anyhow::Result<()>;

    /// A closed listener is dropped by the bus after the current publish
    fn is_closed(&self) -> bool {
        false
    }
}

/// Closure-style subscription
pub type ActionCallback = Box<dyn Fn(&ActionEvent) + Send + Sync>;

/// Handle returned by [`EventBus::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Forwards events into a bounded channel for consumers on other threads
///
/// Once the receiving end is dropped the listener reports itself closed.
pub struct ChannelListener {
    sender: Sender<ActionEvent>,
    disconnected: AtomicBool,
}

impl ChannelListener {
    pub fn new(sender: Sender<ActionEvent>) -> Self {
        Self {
            sender,
            disconnected: AtomicBool::new(false),
        }
    }
}

impl ActionListener for ChannelListener {
    fn on_action_triggered(&self, event: &ActionEvent) -> anyhow::Result<()> {
        match self.sender.try_send(*event) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(anyhow::anyhow!("Action channel full")),
            Err(TrySendError::Disconnected(_)) => {
                self.disconnected.store(true, Ordering::Relaxed);
                Ok(())
            }
        }
    }

    fn is_closed(&self) -> bool {
        self.disconnected.load(Ordering::Relaxed)
    }
}

/// Fan-out of action events with immediate and deferred delivery
///
/// Listeners run synchronously in registration order. A failing or panicking
/// listener is logged and skipped; it never reaches the publisher and never
/// stops delivery to the remaining listeners.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<Arc<dyn ActionListener>>,
    callbacks: Vec<(SubscriptionId, ActionCallback)>,
    pending: VecDeque<ActionEvent>,
    next_subscription: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; registering the same handle twice is a no-op
    pub fn register_listener(&mut self, listener: Arc<dyn ActionListener>) -> bool {
        if self.listeners.iter().any(|l| Arc::ptr_eq(l, &listener)) {
            return false;
        }
        self.listeners.push(listener);
        true
    }

    pub fn unregister_listener(&mut self, listener: &Arc<dyn ActionListener>) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| !Arc::ptr_eq(l, listener));
        self.listeners.len() != before
    }

    /// Subscribe a closure, invoked after all registered listeners
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&ActionEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(sub, _)| *sub != id);
        self.callbacks.len() != before
    }

    /// Register a forwarding listener and return the receiving end
    pub fn channel(&mut self, capacity: usize) -> Receiver<ActionEvent> {
        let (sender, receiver) = bounded(capacity);
        self.register_listener(Arc::new(ChannelListener::new(sender)));
        receiver
    }

    /// Deliver an event to every listener now, then drop closed listeners
    pub fn publish(&mut self, event: &ActionEvent) {
        for listener in &self.listeners {
            match catch_unwind(AssertUnwindSafe(|| listener.on_action_triggered(event))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => error!("Error in action listener for {:?}: {:#}", event.action_type(), e),
                Err(_) => error!("Action listener panicked on {:?}", event.action_type()),
            }
        }

        let before = self.listeners.len();
        self.listeners.retain(|l| !l.is_closed());
        if self.listeners.len() != before {
            info!("Dropped {} closed action listeners", before - self.listeners.len());
        }

        for (id, callback) in &self.callbacks {
            if catch_unwind(AssertUnwindSafe(|| callback(event))).is_err() {
                error!("Action callback {:?} panicked on {:?}", id, event.action_type());
            }
        }
    }

    /// Queue an event for the next [`EventBus::process_deferred_events`]
    pub fn publish_deferred(&mut self, event: ActionEvent) {
        self.pending.push_back(event);
    }

    /// Drain the deferred queue in FIFO order; call once per tick
    pub fn process_deferred_events(&mut self) -> usize {
        let mut delivered = 0;
        while let Some(event) = self.pending.pop_front() {
            self.publish(&event);
            delivered += 1;
        }
        if delivered > 0 {
            debug!("Delivered {} deferred action events", delivered);
        }
        delivered
    }

    /// Drop all listeners, subscriptions and pending events
    pub fn clear(&mut self) {
        self.listeners.clear();
        self.callbacks.clear();
        self.pending.clear();
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len() + self.callbacks.len()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .field("callbacks", &self.callbacks.len())
            .field("pending", &self.pending.len())
            .finish()
    }
}
