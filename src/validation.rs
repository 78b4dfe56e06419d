/*
    Copyright © 2026, Simulator-rs Contributors
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! The capability trait for stateful validation provided by the user.

use std::fmt::Display;

use crate::storage::TemporaryView;
use crate::types::proposal::Proposal;

/// Filters a proposal down to the subset of its transactions that apply cleanly to the world
/// state, as seen through a temporary view.
///
/// Besides implementing [`validate`](Self::validate), implementors are expected to be
/// *deterministic*: the same (proposal, view) pair must always produce the same verified
/// proposal. The returned proposal must target the same height as the input and its transactions
/// must be a subsequence of the input's; the simulation pipeline checks this at the boundary
/// and drops proposals whose validation violates it. Any effects applied to the view must not be
/// visible after the view is released.
pub trait StatefulValidator<V: TemporaryView>: Send + 'static {
    fn validate(&mut self, proposal: &Proposal, view: &mut V) -> Result<Proposal, ValidationError>;
}

/// The validator failed to produce a verified proposal at all. Per-transaction rejections are
/// not errors; they are expressed by filtering transactions out of the verified proposal.
#[derive(Debug)]
pub struct ValidationError {
    pub reason: String,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason)
    }
}
