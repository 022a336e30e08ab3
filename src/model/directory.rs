//! Keyed collection of tracked channels.
//!
//! All channel mutation the session performs goes through the directory, so
//! that each resulting [`ChannelEvent`] is re-published once, tagged with the
//! channel it happened in. Observers subscribe here instead of per channel.

use std::collections::HashMap;

use parley_proto::WhoisUser;
use tokio::sync::mpsc;
use tracing::trace;

use super::channel::{Channel, ChannelEvent, ChannelHandle};
use crate::notify::{Observers, SubscriptionId};

/// A channel event attributed to its channel.
#[derive(Clone, Debug)]
pub struct DirectoryEvent {
    pub channel: String,
    pub event: ChannelEvent,
}

/// Channels by name.
#[derive(Debug, Default)]
pub struct ChannelDirectory {
    channels: HashMap<String, ChannelHandle>,
    events: Observers<DirectoryEvent>,
}

impl ChannelDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a channel, keyed by its name.
    ///
    /// If a channel of that name is already tracked it is kept and returned;
    /// names are unique.
    pub fn add(&mut self, channel: Channel) -> ChannelHandle {
        self.channels
            .entry(channel.name().to_string())
            .or_insert_with(|| channel.into_handle())
            .clone()
    }

    pub fn remove(&mut self, name: &str) -> Option<ChannelHandle> {
        self.channels.remove(name)
    }

    /// Exact-key lookup.
    pub fn get(&self, name: &str) -> Option<ChannelHandle> {
        self.channels.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.channels.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Tracked channel names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.channels.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&DirectoryEvent) + Send + 'static,
    {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    pub fn forward_to(&mut self, tx: mpsc::UnboundedSender<DirectoryEvent>) -> SubscriptionId {
        self.events.forward_to(tx)
    }

    // ------------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------------

    pub fn add_member(&mut self, channel: &str, nickname: &str) -> bool {
        let event = self.mutate(channel, |c| c.add_member(nickname)).flatten();
        self.publish_all(channel, event)
    }

    /// Returns the number of members added.
    pub fn add_members(&mut self, channel: &str, names: &str) -> usize {
        let events = self.mutate(channel, |c| c.add_members(names)).unwrap_or_default();
        let added = events.len();
        self.publish_all(channel, events);
        added
    }

    pub fn remove_member(&mut self, channel: &str, nickname: &str) -> bool {
        let event = self.mutate(channel, |c| c.remove_member(nickname)).flatten();
        self.publish_all(channel, event)
    }

    /// Append a message. `false` if the channel is untracked or the sender is
    /// not in its roster.
    pub fn add_message(&mut self, channel: &str, sender: &str, text: &str) -> bool {
        let event = self.mutate(channel, |c| c.add_message(sender, text)).flatten();
        self.publish_all(channel, event)
    }

    pub fn set_topic(&mut self, channel: &str, topic: &str) -> bool {
        let event = self.mutate(channel, |c| c.set_topic(topic));
        self.publish_all(channel, event)
    }

    /// Mark a channel joined and hand back its handle.
    pub fn mark_joined(&mut self, channel: &str) -> Option<ChannelHandle> {
        let handle = self.get(channel)?;
        handle.write().set_joined(true);
        Some(handle)
    }

    /// Apply a WHOIS reply to every roster member with that nickname.
    /// Returns the number of channels where a member was updated.
    pub fn update_member(&mut self, whois: &WhoisUser) -> usize {
        self.for_each_channel(|c| c.update_member(whois))
    }

    /// Remove a nickname from every roster (the member quit the network).
    /// Returns the number of channels it was removed from.
    pub fn remove_member_everywhere(&mut self, nickname: &str) -> usize {
        self.for_each_channel(|c| c.remove_member(nickname))
    }

    /// Run `f` on one channel under its write lock. The lock is released
    /// before anything is published.
    fn mutate<R>(&self, name: &str, f: impl FnOnce(&mut Channel) -> R) -> Option<R> {
        let handle = self.channels.get(name)?;
        let mut channel = handle.write();
        Some(f(&mut channel))
    }

    fn for_each_channel(&mut self, mut f: impl FnMut(&mut Channel) -> Option<ChannelEvent>) -> usize {
        let events: Vec<(String, ChannelEvent)> = self
            .channels
            .iter()
            .filter_map(|(name, handle)| f(&mut handle.write()).map(|e| (name.clone(), e)))
            .collect();
        let touched = events.len();
        for (channel, event) in events {
            self.publish(channel, event);
        }
        touched
    }

    fn publish_all(&mut self, channel: &str, events: impl IntoIterator<Item = ChannelEvent>) -> bool {
        let mut any = false;
        for event in events {
            self.publish(channel.to_string(), event);
            any = true;
        }
        any
    }

    fn publish(&mut self, channel: String, event: ChannelEvent) {
        trace!(channel = %channel, event = event.kind(), "Channel event");
        self.events.publish(&DirectoryEvent { channel, event });
    }
}
