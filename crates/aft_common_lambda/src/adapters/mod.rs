//! SDK-backed implementations of the pipeline's remote capabilities.
//!
//! Every adapter exposes a synchronous interface and bridges into the current
//! Tokio runtime, which must be multi-threaded.

use std::future::Future;

pub mod dynamodb;
pub mod messaging;
pub mod orchestration;
pub mod organizations;
pub mod parameters;
pub mod service_catalog;
pub mod session;

pub(crate) fn block_on<F: Future>(future: F) -> F::Output {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
