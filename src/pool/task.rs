//! Deferred unit of work run by a [`Pool`](super::Pool)

use crate::error::{Error, Result};
use futures::FutureExt;
use futures::future::BoxFuture;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

type Operation<T> = Box<dyn FnOnce() -> BoxFuture<'static, Result<T>> + Send>;

/// A zero-argument fallible operation, executed at most once
///
/// A panic raised while building or polling the operation is turned into
/// [`Error::TaskPanicked`] instead of unwinding through the worker.
pub struct Task<T> {
    operation: Operation<T>,
}

impl<T: Send + 'static> Task<T> {
    /// Wrap an async operation
    pub fn new<F, Fut>(operation: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        Self {
            operation: Box::new(move || operation().boxed()),
        }
    }

    /// Execute the operation and return its outcome
    pub async fn run(self) -> Result<T> {
        let future = match std::panic::catch_unwind(AssertUnwindSafe(self.operation)) {
            Ok(future) => future,
            Err(payload) => return Err(Error::TaskPanicked(panic_message(payload.as_ref()))),
        };

        match AssertUnwindSafe(future).catch_unwind().await {
            Ok(outcome) => outcome,
            Err(payload) => Err(Error::TaskPanicked(panic_message(payload.as_ref()))),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
