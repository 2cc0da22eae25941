//! Observability for ledger operations.
//!
//! Accounts know nothing about tracing. [`Instrumented`] wraps any [`Ledger`](crate::Ledger)
//! and turns each call into a [`SpanRecord`] handed to an injected [`Observer`]. The
//! observer is created once by the caller and shut down explicitly when it is done.

mod instrumented;
mod observer;

pub use instrumented::Instrumented;
pub use observer::{CollectingObserver, LogObserver, Observer, SpanName, SpanRecord, Warning};
