//! Runtime abstraction layer for async operations
//!
//! The view itself is synchronous; only store round trips run on an async
//! runtime. This module hides which runtime that is behind a small spawner
//! trait so the worker does not depend on tokio directly.

use crate::Result;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// A trait for spawning async tasks (object-safe version)
pub trait AsyncSpawner: Send + Sync + 'static {
    /// Spawn a future and return a handle to it
    fn spawn_boxed(
        &self,
        future: Pin<Box<dyn Future<Output = ()> + Send + 'static>>,
    ) -> Box<dyn AsyncHandle>;

    /// Future that resolves after `duration` without blocking the executor
    fn delay(&self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + 'static>>;
}

/// Handle to a spawned async task
pub trait AsyncHandle: Send + Sync {
    /// Check if the task is finished
    fn is_finished(&self) -> bool;

    /// Cancel the task
    fn cancel(&self);
}

/// Spawns `future` on the process-wide runtime
pub fn spawn<F>(future: F) -> Result<Box<dyn AsyncHandle>>
where
    F: Future<Output = ()> + Send + 'static,
{
    log::debug!("runtime::spawn() - spawning async task");
    Ok(runtime()?.spawn_boxed(Box::pin(future)))
}

/// Default spawner implementations
pub mod spawners {
    #[cfg(feature = "tokio-runtime")]
    pub mod tokio_impl {
        use super::super::{AsyncHandle, AsyncSpawner};
        use ::tokio::task::JoinHandle;
        use std::future::Future;
        use std::pin::Pin;
        use std::time::Duration;

        /// Tokio-based async spawner
        pub struct TokioSpawner;

        impl AsyncSpawner for TokioSpawner {
            fn spawn_boxed(
                &self,
                future: Pin<Box<dyn Future<Output = ()> + Send + 'static>>,
            ) -> Box<dyn AsyncHandle> {
                let handle = ::tokio::spawn(future);
                Box::new(TokioHandle(handle))
            }

            fn delay(&self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + 'static>> {
                Box::pin(::tokio::time::sleep(duration))
            }
        }

        struct TokioHandle(JoinHandle<()>);

        impl AsyncHandle for TokioHandle {
            fn is_finished(&self) -> bool {
                self.0.is_finished()
            }

            fn cancel(&self) {
                self.0.abort();
            }
        }
    }
}

pub mod async_utils {
    /// Async delay on the configured runtime's timer
    pub async fn async_delay(duration: std::time::Duration) {
        match super::runtime() {
            Ok(spawner) => spawner.delay(duration).await,
            Err(e) => log::warn!("delay of {:?} skipped: {}", duration, e),
        }
    }
}

/// Global runtime instance
static RUNTIME: once_cell::sync::OnceCell<Box<dyn AsyncSpawner>> = once_cell::sync::OnceCell::new();

/// Initialize the runtime with a specific spawner; later calls are ignored
pub fn init_runtime(spawner: Box<dyn AsyncSpawner>) {
    if RUNTIME.set(spawner).is_err() {
        log::debug!("runtime already initialised");
    }
}

/// Get the global runtime spawner
pub fn runtime() -> Result<&'static dyn AsyncSpawner> {
    #[cfg(feature = "tokio-runtime")]
    {
        Ok(RUNTIME
            .get_or_init(|| Box::new(spawners::tokio_impl::TokioSpawner))
            .as_ref())
    }

    #[cfg(not(feature = "tokio-runtime"))]
    {
        RUNTIME.get().map(|spawner| spawner.as_ref()).ok_or_else(|| {
            crate::MapError::Runtime("no async runtime; enable 'tokio-runtime' or call init_runtime".to_string())
        })
    }
}
