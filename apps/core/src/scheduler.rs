//! Delayed continuations.
//!
//! Simulated latency (the chatbot "typing", a counselor "confirming") is
//! expressed as a continuation scheduled after a delay, so the policy that
//! produces the continuation never waits on a clock itself.

use futures::future::BoxFuture;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::sleep;

pub trait TaskScheduler: Send + Sync + 'static {
    /// Runs `task` once `delay` has elapsed.
    fn schedule(&self, delay: Duration, task: BoxFuture<'static, ()>) -> JoinHandle<()>;
}

/// Spawns each continuation on the tokio runtime after sleeping for its delay.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

impl TaskScheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: BoxFuture<'static, ()>) -> JoinHandle<()> {
        tokio::spawn(async move {
            if !delay.is_zero() {
                sleep(delay).await;
            }
            task.await;
        })
    }
}

/// Ignores the delay and runs continuations as soon as the runtime polls them.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateScheduler;

impl TaskScheduler for ImmediateScheduler {
    fn schedule(&self, _delay: Duration, task: BoxFuture<'static, ()>) -> JoinHandle<()> {
        tokio::spawn(task)
    }
}
