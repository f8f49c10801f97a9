//! Privileged execution adapters
//!
//! | Executor | Behaviour |
//! |----------|-----------|
//! | [`DirectExecutor`] | Runs every action as-is |
//! | [`SandboxedExecutor`] | Checks a [`SandboxPolicy`] and runs inside a privileged frame |
//! | [`AmbientExecutor`] | Delegates to whatever executor is installed process-wide |

pub mod ambient;
pub mod direct;
pub mod sandboxed;

pub use ambient::{
    AmbientExecutor, ambient_executor, install_executor, install_sandbox, is_sandbox_active,
    uninstall_sandbox,
};
pub use direct::DirectExecutor;
pub use sandboxed::{SandboxPolicy, SandboxedExecutor, in_privileged_frame};
