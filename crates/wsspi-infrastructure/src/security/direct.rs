//! Passthrough executor used when no sandbox is active

use wsspi_domain::{PrivilegedExecutor, PrivilegedOperation, Result};

#[derive(Debug, Clone, Copy, Default)]
pub struct DirectExecutor;

impl PrivilegedExecutor for DirectExecutor {
    fn is_sandboxed(&self) -> bool {
        false
    }

    fn execute(
        &self,
        _operation: &PrivilegedOperation<'_>,
        action: &mut dyn FnMut() -> Result<()>,
    ) -> Result<()> {
        action()
    }
}
