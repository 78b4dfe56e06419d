/*
    Copyright © 2026, Simulator-rs Contributors
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Functions that assemble and start the simulation pipeline, as well as
//! [the type](SimulatorService) which keeps it alive.
//!
//! A [`SimulatorSpec`] collects the five capabilities the pipeline consumes (world state,
//! block storage, stateful validation, signing, and the ordering gate) along with a
//! [`Configuration`] and optional event handlers. [`start`](SimulatorSpec::start) subscribes to
//! the ordering gate, spawns the worker thread that serializes proposal processing, and (if any
//! handlers or logging are enabled) the event bus thread.
//!
//! Subscribing happens inside `start`, not at construction, and
//! [`shutdown`](SimulatorService::shutdown) (or dropping the service) stops the worker, which
//! drops the ordering-gate subscription, before anything else. This breaks the gate-to-pipeline
//! subscription cycle before any collaborator is destroyed.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use typed_builder::TypedBuilder;

use crate::crypto::CryptoProvider;
use crate::event_bus::{start_event_bus, EventHandlers, HandlerPtr};
use crate::events::{
    DropProposalEvent, ProduceBlockEvent, ReceiveProposalEvent, SignBlockFailureEvent,
    VerifyProposalEvent,
};
use crate::ordering::OrderingGate;
use crate::simulator::Simulator;
use crate::storage::{BlockQuery, TemporaryViewFactory};
use crate::stream::{Publisher, Subscription};
use crate::types::block::Block;
use crate::types::proposal::Proposal;
use crate::validation::StatefulValidator;

/// Operator-facing configuration of the pipeline.
#[derive(Clone, TypedBuilder)]
pub struct Configuration {
    /// Whether to enable the default logging handlers defined in [logging](crate::logging).
    pub log_events: bool,

    /// How long the worker thread waits on the proposal subscription before re-checking its
    /// shutdown signal.
    #[builder(default = Duration::from_millis(10))]
    pub proposal_poll_interval: Duration,
}

/// Everything needed to start a simulation pipeline. Build one with
/// [`builder`](SimulatorSpec::builder), then call [`start`](SimulatorSpec::start).
#[derive(TypedBuilder)]
pub struct SimulatorSpec<F, Q, V, C, O>
where
    F: TemporaryViewFactory,
    Q: BlockQuery,
    V: StatefulValidator<F::View>,
    C: CryptoProvider,
    O: OrderingGate,
{
    view_factory: F,
    block_query: Q,
    validator: V,
    crypto: C,
    ordering_gate: O,
    configuration: Configuration,

    #[builder(default, setter(transform = |handler: impl Fn(&ReceiveProposalEvent) + Send + 'static| Some(Box::new(handler) as HandlerPtr<ReceiveProposalEvent>)))]
    on_receive_proposal: Option<HandlerPtr<ReceiveProposalEvent>>,

    #[builder(default, setter(transform = |handler: impl Fn(&DropProposalEvent) + Send + 'static| Some(Box::new(handler) as HandlerPtr<DropProposalEvent>)))]
    on_drop_proposal: Option<HandlerPtr<DropProposalEvent>>,

    #[builder(default, setter(transform = |handler: impl Fn(&VerifyProposalEvent) + Send + 'static| Some(Box::new(handler) as HandlerPtr<VerifyProposalEvent>)))]
    on_verify_proposal: Option<HandlerPtr<VerifyProposalEvent>>,

    #[builder(default, setter(transform = |handler: impl Fn(&ProduceBlockEvent) + Send + 'static| Some(Box::new(handler) as HandlerPtr<ProduceBlockEvent>)))]
    on_produce_block: Option<HandlerPtr<ProduceBlockEvent>>,

    #[builder(default, setter(transform = |handler: impl Fn(&SignBlockFailureEvent) + Send + 'static| Some(Box::new(handler) as HandlerPtr<SignBlockFailureEvent>)))]
    on_sign_block_failure: Option<HandlerPtr<SignBlockFailureEvent>>,
}

impl<F, Q, V, C, O> SimulatorSpec<F, Q, V, C, O>
where
    F: TemporaryViewFactory,
    Q: BlockQuery,
    V: StatefulValidator<F::View>,
    C: CryptoProvider,
    O: OrderingGate,
{
    /// Subscribe to the ordering gate and start the pipeline's threads.
    pub fn start(mut self) -> SimulatorService {
        let proposals = self.ordering_gate.on_proposal();

        let event_handlers = EventHandlers::new(
            self.configuration.log_events,
            self.on_receive_proposal,
            self.on_drop_proposal,
            self.on_verify_proposal,
            self.on_produce_block,
            self.on_sign_block_failure,
        );

        let event_publisher = if event_handlers.is_empty() {
            None
        } else {
            Some(mpsc::channel())
        };

        let simulator = Simulator::new(
            self.view_factory,
            self.block_query,
            self.validator,
            self.crypto,
            event_publisher.as_ref().map(|(sender, _)| sender.clone()),
        );
        let verified_proposals = simulator.publisher_of_verified_proposals();
        let blocks = simulator.publisher_of_blocks();

        let (worker_shutdown, worker_shutdown_receiver) = mpsc::channel();
        let worker = start_worker(
            simulator,
            proposals,
            worker_shutdown_receiver,
            self.configuration.proposal_poll_interval,
        );

        let (event_bus, event_bus_shutdown) = match event_publisher {
            Some((_, event_subscriber)) => {
                let (event_bus_shutdown, event_bus_shutdown_receiver) = mpsc::channel();
                let event_bus = start_event_bus(
                    event_handlers,
                    event_subscriber,
                    event_bus_shutdown_receiver,
                );
                (Some(event_bus), Some(event_bus_shutdown))
            }
            None => (None, None),
        };

        SimulatorService {
            verified_proposals,
            blocks,
            worker: Some(worker),
            worker_shutdown,
            event_bus,
            event_bus_shutdown,
        }
    }
}

/// A running simulation pipeline. Keeps the worker (and, if enabled, the event bus) alive and
/// exposes the two output streams. [`shutdown`](Self::shutdown), or dropping the service, tears
/// the threads down in order.
pub struct SimulatorService {
    verified_proposals: Publisher<Proposal>,
    blocks: Publisher<Block>,
    worker: Option<JoinHandle<()>>,
    worker_shutdown: Sender<()>,
    event_bus: Option<JoinHandle<()>>,
    event_bus_shutdown: Option<Sender<()>>,
}

impl SimulatorService {
    /// The hot stream of proposals that passed stateful validation.
    pub fn on_verified_proposal(&self) -> Subscription<Proposal> {
        self.verified_proposals.subscribe()
    }

    /// The hot stream of signed candidate blocks.
    pub fn on_block(&self) -> Subscription<Block> {
        self.blocks.subscribe()
    }

    /// Stop the pipeline: the worker first (dropping the ordering-gate subscription), then the
    /// event bus. Equivalent to dropping the service, but explicit at call sites that care
    /// about teardown order relative to collaborators.
    pub fn shutdown(mut self) {
        self.shut_down_threads()
    }

    fn shut_down_threads(&mut self) {
        // Safety: the order of thread shutdown in this function is important. The worker is the
        // event publisher, so it must be gone before the event bus is told to stop; stopping the
        // worker also drops its subscription to the ordering gate.
        if let Some(worker) = self.worker.take() {
            let _ = self.worker_shutdown.send(());
            let _ = worker.join();
        }

        if let Some(event_bus) = self.event_bus.take() {
            if let Some(event_bus_shutdown) = &self.event_bus_shutdown {
                let _ = event_bus_shutdown.send(());
            }
            let _ = event_bus.join();
        }
    }
}

impl Drop for SimulatorService {
    fn drop(&mut self) {
        self.shut_down_threads()
    }
}

/// Starts the worker thread, which serializes `process_proposal` invocations in the order
/// proposals are received, until a shutdown signal arrives or the ordering gate closes its
/// stream.
fn start_worker<F, Q, V, C>(
    mut simulator: Simulator<F, Q, V, C>,
    proposals: Subscription<Proposal>,
    shutdown_signal: Receiver<()>,
    poll_interval: Duration,
) -> JoinHandle<()>
where
    F: TemporaryViewFactory,
    Q: BlockQuery,
    V: StatefulValidator<F::View>,
    C: CryptoProvider,
{
    thread::spawn(move || loop {
        match shutdown_signal.try_recv() {
            Ok(()) => return,
            Err(TryRecvError::Empty) => (),
            Err(TryRecvError::Disconnected) => {
                panic!("worker thread disconnected from main thread")
            }
        }

        match proposals.recv_timeout(poll_interval) {
            Ok(proposal) => simulator.process_proposal(proposal),
            Err(RecvTimeoutError::Timeout) => (),
            // The ordering gate dropped its producing side; no proposal can ever arrive again.
            Err(RecvTimeoutError::Disconnected) => return,
        }
    })
}
