/*
    Copyright © 2026, Simulator-rs Contributors
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! A candidate-block simulation stage for permissioned blockchain pipelines.
//!
//! Simulator-rs sits between an ordering subsystem, which batches client transactions into
//! [proposals](types::proposal::Proposal), and a consensus subsystem, which votes on
//! [blocks](types::block::Block). For every incoming proposal it fetches the chain tip, checks
//! chain continuity, filters stateful-invalid transactions against a rollback-only
//! [temporary view](storage::TemporaryView) of world state, and publishes both the filtered
//! ("verified") proposal and a signed candidate block on hot broadcast
//! [streams](stream::Publisher), all without mutating persistent state.
//!
//! The surrounding application provides five capabilities: a
//! [temporary-view factory](storage::TemporaryViewFactory), a [block query](storage::BlockQuery),
//! a [stateful validator](validation::StatefulValidator), a [crypto provider](crypto::CryptoProvider),
//! and an [ordering gate](ordering::OrderingGate). Assemble them with a
//! [`SimulatorSpec`](service::SimulatorSpec) and call
//! [`start`](service::SimulatorSpec::start); or drive the [`Simulator`](simulator::Simulator)
//! core directly if you manage your own scheduling.

pub mod types;

pub mod storage;

pub mod validation;

pub mod crypto;

pub mod ordering;

pub mod stream;

pub mod events;

pub mod logging;

pub(crate) mod event_bus;

pub mod simulator;

pub mod service;

// Re-exports
pub use crate::service::{Configuration, SimulatorService, SimulatorSpec};
pub use crate::simulator::Simulator;
