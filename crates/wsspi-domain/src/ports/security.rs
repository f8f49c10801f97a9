//! Privileged execution
//!
//! Every resource read, implementation load, context switch and property
//! read performed by the resolver is expressed as a [`PrivilegedOperation`]
//! and handed to a [`PrivilegedExecutor`] together with the action that
//! performs it. A sandboxing executor may refuse the operation; a direct
//! executor just runs the action.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Category of a privileged operation, used by sandbox policies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// Open a resource through a loading context
    ReadResource,
    /// Look up an implementation through a loading context
    LoadImplementation,
    /// Read the thread's current loading context
    GetContextLoader,
    /// Replace the thread's current loading context
    SetContextLoader,
    /// Read a process property
    ReadProperty,
    /// Read a file outside any loading context
    ReadFile,
}

impl OperationKind {
    /// Every operation kind
    pub const ALL: [Self; 6] = [
        Self::ReadResource,
        Self::LoadImplementation,
        Self::GetContextLoader,
        Self::SetContextLoader,
        Self::ReadProperty,
        Self::ReadFile,
    ];
}

/// A privileged operation together with its target
#[derive(Debug, Clone, Copy)]
pub enum PrivilegedOperation<'a> {
    /// Open `path` through the context named `context`
    ReadResource {
        /// Context name
        context: &'a str,
        /// Resource path
        path: &'a str,
    },
    /// Look up implementation `name` through the context named `context`
    LoadImplementation {
        /// Context name
        context: &'a str,
        /// Implementation identifier
        name: &'a str,
    },
    /// Read the thread's current loading context
    GetContextLoader,
    /// Replace the thread's current loading context
    SetContextLoader,
    /// Read the process property `name`
    ReadProperty {
        /// Property name
        name: &'a str,
    },
    /// Read the file at `path`
    ReadFile {
        /// File path
        path: &'a Path,
    },
}

impl PrivilegedOperation<'_> {
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::ReadResource { .. } => OperationKind::ReadResource,
            Self::LoadImplementation { .. } => OperationKind::LoadImplementation,
            Self::GetContextLoader => OperationKind::GetContextLoader,
            Self::SetContextLoader => OperationKind::SetContextLoader,
            Self::ReadProperty { .. } => OperationKind::ReadProperty,
            Self::ReadFile { .. } => OperationKind::ReadFile,
        }
    }
}

impl fmt::Display for PrivilegedOperation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadResource { context, path } => {
                write!(f, "read resource '{path}' from context '{context}'")
            }
            Self::LoadImplementation { context, name } => {
                write!(f, "load implementation '{name}' from context '{context}'")
            }
            Self::GetContextLoader => f.write_str("get current loading context"),
            Self::SetContextLoader => f.write_str("set current loading context"),
            Self::ReadProperty { name } => write!(f, "read property '{name}'"),
            Self::ReadFile { path } => write!(f, "read file '{}'", path.display()),
        }
    }
}

/// Execution wrapper for privileged operations
///
/// `execute` must either refuse the operation with
/// [`Error::PermissionDenied`] or run `action` exactly once and return its
/// result unchanged.
pub trait PrivilegedExecutor: Send + Sync + fmt::Debug {
    /// Whether a security policy is being enforced
    fn is_sandboxed(&self) -> bool;

    /// Run `action` on behalf of `operation`
    fn execute(
        &self,
        operation: &PrivilegedOperation<'_>,
        action: &mut dyn FnMut() -> Result<()>,
    ) -> Result<()>;
}

/// Run a value-returning action through `executor`
pub fn run_privileged<T, F>(
    executor: &dyn PrivilegedExecutor,
    operation: PrivilegedOperation<'_>,
    action: F,
) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    let mut action = Some(action);
    let mut output = None;
    executor.execute(&operation, &mut || {
        if let Some(action) = action.take() {
            output = Some(action()?);
        }
        Ok(())
    })?;
    output.ok_or_else(|| Error::internal(format!("Privileged action did not run: {operation}")))
}
