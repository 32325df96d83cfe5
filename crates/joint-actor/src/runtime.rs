//! # Shared Runtime
//!
//! Blocking callers need a tokio runtime to drive their actor, but should not
//! each start one. [`SharedRuntime`] hands out one lazily built runtime
//! through a weak checkout:
//!
//! - the first [`SharedRuntime::acquire`] builds it;
//! - later calls reuse it while any returned `Arc` is alive;
//! - once the last `Arc` drops the runtime shuts down, and the next call
//!   builds a fresh one.
//!
//! Drop the last `Arc<Runtime>` from a plain thread; tokio refuses to shut a
//! runtime down from inside async code.

use crate::error::ActorError;
use std::sync::{Arc, Mutex, PoisonError, Weak};
use tokio::runtime::{Builder, Runtime};
use tracing::info;

static GLOBAL: SharedRuntime = SharedRuntime::new("joint-bridge");

pub struct SharedRuntime {
    thread_name: &'static str,
    slot: Mutex<Weak<Runtime>>,
}

impl SharedRuntime {
    pub const fn new(thread_name: &'static str) -> Self {
        Self {
            thread_name,
            slot: Mutex::new(Weak::new()),
        }
    }

    /// Process-wide instance.
    pub fn global() -> &'static SharedRuntime {
        &GLOBAL
    }

    pub fn acquire(&self) -> Result<Arc<Runtime>, ActorError> {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(runtime) = slot.upgrade() {
            return Ok(runtime);
        }
        let runtime = Arc::new(
            Builder::new_multi_thread()
                .worker_threads(2)
                .thread_name(self.thread_name)
                .enable_all()
                .build()?,
        );
        info!(thread_name = self.thread_name, "Started shared runtime");
        *slot = Arc::downgrade(&runtime);
        Ok(runtime)
    }

    /// Whether a runtime is currently checked out.
    pub fn is_running(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .strong_count()
            > 0
    }
}
