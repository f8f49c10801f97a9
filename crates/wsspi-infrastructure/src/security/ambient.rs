//! Process-wide executor selection
//!
//! The ambient executor is [`DirectExecutor`] until a sandbox is installed.
//! Components built with [`AmbientExecutor`] pick up the change on their
//! next privileged operation.

use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwap;
use tracing::info;
use wsspi_domain::{PrivilegedExecutor, PrivilegedOperation, Result};

use super::direct::DirectExecutor;
use super::sandboxed::{SandboxPolicy, SandboxedExecutor};

// ArcSwap needs a sized payload, hence the wrapper around the trait object
#[derive(Debug)]
struct ExecutorSlot(Arc<dyn PrivilegedExecutor>);

static AMBIENT: LazyLock<ArcSwap<ExecutorSlot>> =
    LazyLock::new(|| ArcSwap::from_pointee(ExecutorSlot(Arc::new(DirectExecutor))));

/// The executor currently installed for the process
pub fn ambient_executor() -> Arc<dyn PrivilegedExecutor> {
    Arc::clone(&AMBIENT.load().0)
}

/// Install `executor` process-wide, returning the previous one
pub fn install_executor(executor: Arc<dyn PrivilegedExecutor>) -> Arc<dyn PrivilegedExecutor> {
    let previous = AMBIENT.swap(Arc::new(ExecutorSlot(executor)));
    Arc::clone(&previous.0)
}

/// Install a sandbox enforcing `policy`
pub fn install_sandbox(policy: SandboxPolicy) -> Arc<dyn PrivilegedExecutor> {
    info!(
        granted = ?policy.granted().collect::<Vec<_>>(),
        "Installing process-wide sandbox"
    );
    install_executor(Arc::new(SandboxedExecutor::new(policy)))
}

/// Return to direct execution
pub fn uninstall_sandbox() -> Arc<dyn PrivilegedExecutor> {
    install_executor(Arc::new(DirectExecutor))
}

pub fn is_sandbox_active() -> bool {
    AMBIENT.load().0.is_sandboxed()
}

/// Executor that follows the process-wide selection
#[derive(Debug, Clone, Copy, Default)]
pub struct AmbientExecutor;

impl PrivilegedExecutor for AmbientExecutor {
    fn is_sandboxed(&self) -> bool {
        is_sandbox_active()
    }

    fn execute(
        &self,
        operation: &PrivilegedOperation<'_>,
        action: &mut dyn FnMut() -> Result<()>,
    ) -> Result<()> {
        ambient_executor().execute(operation, action)
    }
}
