/*
    Copyright © 2026, Simulator-rs Contributors
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Thread that receives events emitted by the simulation worker and passes them to event
//! handlers.
//!
//! When the thread receives a message containing an [event](crate::events::Event), it triggers
//! the execution of all handlers defined for the contained event type, where the handlers for
//! each event type are stored in [`EventHandlers`].
//!
//! When no handlers are present in a pipeline's instance of `EventHandlers` this thread is not
//! started.
//!
//! ## Event Handlers
//!
//! A pipeline's instance of `EventHandlers` contains:
//! 1. The handlers provided upon building the pipeline via
//!    [`SimulatorSpec`](crate::service::SimulatorSpec), and
//! 2. If logging is enabled via the pipeline's [config](crate::service::Configuration) then also
//!    the default logging handlers defined in [logging](crate::logging).

use std::{
    sync::mpsc::{Receiver, TryRecvError},
    thread,
    thread::JoinHandle,
};

use crate::{events::*, logging::Logger};

/// Pointer to a handler closure, parametrised by the argument (for our use case, event) type.
pub type HandlerPtr<T> = Box<dyn Fn(&T) + Send>;

/// Stores the two optional handlers enabled for an event type that implements the [`Logger`]
/// trait, namely one logging handler, defined in [`logging`](crate::logging), and one
/// user-defined handler, passed to [`SimulatorSpec`](crate::service::SimulatorSpec).
pub(crate) struct HandlerPair<T: Logger> {
    pub(crate) user_defined_handler: Option<HandlerPtr<T>>,
    pub(crate) logging_handler: Option<HandlerPtr<T>>,
}

impl<T: Logger> HandlerPair<T> {
    // Checks if no event handlers are defined for this event.
    pub(crate) fn is_empty(&self) -> bool {
        self.user_defined_handler.is_none() && self.logging_handler.is_none()
    }

    /// Creates a new `HandlerPair` with the user-defined handler, and the default logging
    /// handler if logging is enabled.
    pub(crate) fn new(log: bool, user_defined_handler: Option<HandlerPtr<T>>) -> HandlerPair<T> {
        HandlerPair {
            user_defined_handler,
            logging_handler: if log { Some(T::get_logger()) } else { None },
        }
    }
}

/// Stores the `HandlerPair` of user-defined and optional logging handlers for each pre-defined
/// event type from [events](crate::events).
pub(crate) struct EventHandlers {
    pub(crate) receive_proposal_handlers: HandlerPair<ReceiveProposalEvent>,
    pub(crate) drop_proposal_handlers: HandlerPair<DropProposalEvent>,
    pub(crate) verify_proposal_handlers: HandlerPair<VerifyProposalEvent>,
    pub(crate) produce_block_handlers: HandlerPair<ProduceBlockEvent>,
    pub(crate) sign_block_failure_handlers: HandlerPair<SignBlockFailureEvent>,
}

impl EventHandlers {
    /// Creates the [handler pairs](HandlerPair) for all pre-defined event types from
    /// [events](crate::events) given the user-defined handlers, and information on whether
    /// logging is enabled.
    pub(crate) fn new(
        log: bool,
        receive_proposal_handler: Option<HandlerPtr<ReceiveProposalEvent>>,
        drop_proposal_handler: Option<HandlerPtr<DropProposalEvent>>,
        verify_proposal_handler: Option<HandlerPtr<VerifyProposalEvent>>,
        produce_block_handler: Option<HandlerPtr<ProduceBlockEvent>>,
        sign_block_failure_handler: Option<HandlerPtr<SignBlockFailureEvent>>,
    ) -> EventHandlers {
        EventHandlers {
            receive_proposal_handlers: HandlerPair::new(log, receive_proposal_handler),
            drop_proposal_handlers: HandlerPair::new(log, drop_proposal_handler),
            verify_proposal_handlers: HandlerPair::new(log, verify_proposal_handler),
            produce_block_handlers: HandlerPair::new(log, produce_block_handler),
            sign_block_failure_handlers: HandlerPair::new(log, sign_block_failure_handler),
        }
    }

    /// Checks if no handlers are defined, i.e., neither user-defined handlers were defined nor
    /// logging is enabled.
    pub(crate) fn is_empty(&self) -> bool {
        self.receive_proposal_handlers.is_empty()
            && self.drop_proposal_handlers.is_empty()
            && self.verify_proposal_handlers.is_empty()
            && self.produce_block_handlers.is_empty()
            && self.sign_block_failure_handlers.is_empty()
    }

    /// Triggers the execution of each of the two handlers - the user-defined and the logging
    /// handler, if defined - for a given event type from [events](crate::events).
    pub(crate) fn fire_handlers(&self, event: Event) {
        match event {
            Event::ReceiveProposal(receive_proposal_event) => {
                self.receive_proposal_handlers
                    .user_defined_handler
                    .iter()
                    .for_each(|handler| handler(&receive_proposal_event));
                self.receive_proposal_handlers
                    .logging_handler
                    .iter()
                    .for_each(|handler| handler(&receive_proposal_event));
            }
            Event::DropProposal(drop_proposal_event) => {
                self.drop_proposal_handlers
                    .user_defined_handler
                    .iter()
                    .for_each(|handler| handler(&drop_proposal_event));
                self.drop_proposal_handlers
                    .logging_handler
                    .iter()
                    .for_each(|handler| handler(&drop_proposal_event));
            }
            Event::VerifyProposal(verify_proposal_event) => {
                self.verify_proposal_handlers
                    .user_defined_handler
                    .iter()
                    .for_each(|handler| handler(&verify_proposal_event));
                self.verify_proposal_handlers
                    .logging_handler
                    .iter()
                    .for_each(|handler| handler(&verify_proposal_event));
            }
            Event::ProduceBlock(produce_block_event) => {
                self.produce_block_handlers
                    .user_defined_handler
                    .iter()
                    .for_each(|handler| handler(&produce_block_event));
                self.produce_block_handlers
                    .logging_handler
                    .iter()
                    .for_each(|handler| handler(&produce_block_event));
            }
            Event::SignBlockFailure(sign_block_failure_event) => {
                self.sign_block_failure_handlers
                    .user_defined_handler
                    .iter()
                    .for_each(|handler| handler(&sign_block_failure_event));
                self.sign_block_failure_handlers
                    .logging_handler
                    .iter()
                    .for_each(|handler| handler(&sign_block_failure_event));
            }
        }
    }
}

/// Starts the event bus thread, which runs an infinite loop until a shutdown signal is received
/// from the parent thread. In each iteration of the loop, the thread checks if it received any
/// event notifications, and if so, then triggers the execution of the handlers defined for the
/// event.
pub(crate) fn start_event_bus(
    event_handlers: EventHandlers,
    event_subscriber: Receiver<Event>,
    shutdown_signal: Receiver<()>,
) -> JoinHandle<()> {
    thread::spawn(move || loop {
        match shutdown_signal.try_recv() {
            Ok(()) => return,
            Err(TryRecvError::Empty) => (),
            Err(TryRecvError::Disconnected) => {
                panic!("event_bus thread disconnected from main thread")
            }
        }

        match event_subscriber.try_recv() {
            Ok(event) => event_handlers.fire_handlers(event),
            Err(TryRecvError::Empty) => thread::yield_now(),
            // The worker thread (event publisher) exited; no further event can arrive.
            Err(TryRecvError::Disconnected) => return,
        }
    })
}
