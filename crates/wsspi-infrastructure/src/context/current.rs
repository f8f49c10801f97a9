//! Thread-current loading context
//!
//! Each thread may carry a current context. Threads that never set one see
//! the process system context. Reads and writes go through the privileged
//! executor as `GetContextLoader` and `SetContextLoader` operations.

use std::cell::RefCell;
use std::sync::Arc;

use wsspi_domain::{
    ContextRef, ContextSupplier, PrivilegedExecutor, PrivilegedOperation, Result, run_privileged,
};

thread_local! {
    static CURRENT: RefCell<Option<ContextRef>> = const { RefCell::new(None) };
}

/// The context explicitly installed on this thread, if any
pub fn current_context() -> Option<ContextRef> {
    CURRENT.with(|current| current.borrow().clone())
}

/// Install `context` on this thread, returning the previous value
pub fn set_current_context(context: Option<ContextRef>) -> Option<ContextRef> {
    CURRENT.with(|current| current.replace(context))
}

/// [`ContextSupplier`] backed by the thread-local current context
#[derive(Debug, Clone)]
pub struct ThreadContextSupplier {
    executor: Arc<dyn PrivilegedExecutor>,
    system: ContextRef,
}

impl ThreadContextSupplier {
    pub fn new(executor: Arc<dyn PrivilegedExecutor>, system: ContextRef) -> Self {
        Self { executor, system }
    }

    /// Context returned on threads without a current context
    pub fn system(&self) -> &ContextRef {
        &self.system
    }
}

impl ContextSupplier for ThreadContextSupplier {
    fn current(&self) -> Result<ContextRef> {
        run_privileged(
            self.executor.as_ref(),
            PrivilegedOperation::GetContextLoader,
            || Ok(current_context().unwrap_or_else(|| Arc::clone(&self.system))),
        )
    }

    fn replace(&self, context: Option<ContextRef>) -> Result<Option<ContextRef>> {
        run_privileged(
            self.executor.as_ref(),
            PrivilegedOperation::SetContextLoader,
            move || Ok(set_current_context(context)),
        )
    }
}
