//! Typed publish/subscribe.
//!
//! Every component that emits notifications owns an [`Observers`] list over
//! its own event enum. Listeners run synchronously, in subscription order,
//! before the publishing call returns.

use tokio::sync::mpsc;

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener<E> = Box<dyn FnMut(&E) + Send>;

/// Listeners for one event type.
pub struct Observers<E> {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener<E>)>,
}

impl<E> Default for Observers<E> {
    fn default() -> Self {
        Self {
            next_id: 0,
            listeners: Vec::new(),
        }
    }
}

impl<E> std::fmt::Debug for Observers<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<E> Observers<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&E) + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    /// Deliver `event` to every listener.
    pub fn publish(&mut self, event: &E) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl<E: Clone + Send + 'static> Observers<E> {
    /// Forward every event into an unbounded channel, for async consumers.
    ///
    /// The listener stays registered after the receiver is dropped; sends to a
    /// closed channel are ignored.
    pub fn forward_to(&mut self, tx: mpsc::UnboundedSender<E>) -> SubscriptionId {
        self.subscribe(move |event: &E| {
            let _ = tx.send(event.clone());
        })
    }
}

// ============================================================================
// Pre-send hooks
// ============================================================================

/// Verdict of a pre-send hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendDecision {
    Proceed,
    Veto,
}

type Hook = Box<dyn FnMut(&str) -> SendDecision + Send>;

/// Cancellable pre-send hooks. The first veto stops evaluation.
#[derive(Default)]
pub struct SendHooks {
    next_id: u64,
    hooks: Vec<(SubscriptionId, Hook)>,
}

impl std::fmt::Debug for SendHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SendHooks")
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

impl SendHooks {
    pub fn add<F>(&mut self, hook: F) -> SubscriptionId
    where
        F: FnMut(&str) -> SendDecision + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.hooks.push((id, Box::new(hook)));
        id
    }

    pub fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.hooks.len();
        self.hooks.retain(|(sid, _)| *sid != id);
        self.hooks.len() != before
    }

    /// Run the hooks over an outbound line.
    pub fn check(&mut self, line: &str) -> SendDecision {
        for (_, hook) in &mut self.hooks {
            if hook(line) == SendDecision::Veto {
                return SendDecision::Veto;
            }
        }
        SendDecision::Proceed
    }
}
