/*
    Copyright © 2026, Simulator-rs Contributors
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! The capability trait for the ordering gate, the upstream source of proposals.
//!
//! The ordering subsystem batches client transactions into proposals and emits them in
//! non-decreasing created-time order. Proposal *heights* are not guaranteed monotonic at this
//! boundary, since ordering may produce stale or premature proposals around forks and catch-up;
//! the simulation pipeline's continuity check is the sole defense.

use crate::stream::{Publisher, Subscription};
use crate::types::proposal::Proposal;

pub trait OrderingGate: Send + 'static {
    /// Subscribe to the hot stream of proposals. The simulation pipeline calls this exactly
    /// once, when it is started, and drops the subscription when it shuts down.
    fn on_proposal(&mut self) -> Subscription<Proposal>;
}

/// An in-process ordering stage that publishes proposals into a [`Publisher`] plugs into the
/// pipeline directly.
impl OrderingGate for Publisher<Proposal> {
    fn on_proposal(&mut self) -> Subscription<Proposal> {
        self.subscribe()
    }
}
