//! Event handlers, one system per [EventKind](crate::clock::EventKind) variant.
//!
//! Each system reads [CurrentEvent](crate::clock::CurrentEvent), mutates the
//! entities and dispatcher, and schedules its follow-up events on the clock.
//! Systems return [SimResult](crate::error::SimResult); the runner pipes the
//! result into [SimFault](crate::runner::SimFault) and aborts the run on error.

pub mod cancellation;
pub mod driver_request;
pub mod dropoff;
pub mod pickup;
pub mod rider_request;
