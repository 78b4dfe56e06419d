/*
    Copyright © 2026, Simulator-rs Contributors
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Single-producer, multi-consumer broadcast channels with hot semantics.
//!
//! A [`Publisher`] fans every published value out to all current subscribers, each of which
//! pulls from its own [`Subscription`]. The streams are *hot*: a subscriber that attaches after
//! a value was published never sees that value. Per subscription, values arrive in publication
//! order.
//!
//! The subscription boundary is thread-safe; publishing is expected to happen from a single
//! thread at a time.

use std::sync::mpsc::{self, Receiver, RecvError, RecvTimeoutError, Sender, TryRecvError};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// The producing side of a broadcast stream. Cloning a `Publisher` yields another handle to the
/// same stream.
pub struct Publisher<T> {
    subscribers: Arc<Mutex<Vec<Sender<T>>>>,
}

impl<T> Clone for Publisher<T> {
    fn clone(&self) -> Self {
        Publisher {
            subscribers: self.subscribers.clone(),
        }
    }
}

impl<T: Clone> Publisher<T> {
    pub fn new() -> Publisher<T> {
        Publisher {
            subscribers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Attach a new subscriber. The subscription only receives values published after this call
    /// returns.
    pub fn subscribe(&self) -> Subscription<T> {
        let (sender, receiver) = mpsc::channel();
        self.subscribers.lock().unwrap().push(sender);
        Subscription { receiver }
    }

    /// Deliver `value` to every live subscriber. Subscribers whose subscription was dropped are
    /// pruned.
    pub fn publish(&self, value: T) {
        let mut subscribers = self.subscribers.lock().unwrap();
        subscribers.retain(|subscriber| subscriber.send(value.clone()).is_ok());
    }
}

impl<T: Clone> Default for Publisher<T> {
    fn default() -> Self {
        Publisher::new()
    }
}

/// The consuming side of a broadcast stream. Dropping a `Subscription` unsubscribes.
pub struct Subscription<T> {
    receiver: Receiver<T>,
}

impl<T> Subscription<T> {
    /// Block until the next value. `Err` means the publisher was dropped and no further value
    /// can arrive.
    pub fn recv(&self) -> Result<T, RecvError> {
        self.receiver.recv()
    }

    pub fn try_recv(&self) -> Result<T, TryRecvError> {
        self.receiver.try_recv()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Result<T, RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}
