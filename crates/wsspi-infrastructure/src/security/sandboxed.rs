//! Sandboxed execution
//!
//! A [`SandboxPolicy`] grants operation kinds and narrows property reads and
//! resource reads with glob allow-lists. [`SandboxedExecutor`] refuses
//! anything the policy does not grant and otherwise runs the action inside a
//! privileged frame, observable with [`in_privileged_frame`].

use std::cell::Cell;
use std::collections::BTreeSet;

use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::{trace, warn};
use wsspi_domain::{
    Error, OperationKind, PrivilegedExecutor, PrivilegedOperation, Result,
};

use crate::config::SecurityConfig;
use crate::constants::MATCH_ALL_PATTERN;

thread_local! {
    static PRIVILEGED_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Whether the current thread is running a sandboxed privileged action
pub fn in_privileged_frame() -> bool {
    PRIVILEGED_DEPTH.with(|depth| depth.get() > 0)
}

struct PrivilegedFrame;

impl PrivilegedFrame {
    fn enter() -> Self {
        PRIVILEGED_DEPTH.with(|depth| depth.set(depth.get() + 1));
        Self
    }
}

impl Drop for PrivilegedFrame {
    fn drop(&mut self) {
        PRIVILEGED_DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

/// Targets a granted property or resource read may touch
#[derive(Debug, Clone)]
struct AllowList {
    patterns: Vec<String>,
    set: GlobSet,
    any: bool,
}

impl AllowList {
    fn none() -> Self {
        Self {
            patterns: Vec::new(),
            set: GlobSet::empty(),
            any: false,
        }
    }

    fn any() -> Self {
        Self {
            patterns: vec![MATCH_ALL_PATTERN.to_string()],
            set: GlobSet::empty(),
            any: true,
        }
    }

    fn compile(kind: &str, patterns: Vec<String>) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &patterns {
            let glob = Glob::new(pattern).map_err(|e| {
                Error::configuration_with_source(format!("Invalid {kind} pattern '{pattern}'"), e)
            })?;
            builder.add(glob);
        }
        let set = builder
            .build()
            .map_err(|e| Error::configuration_with_source(format!("Invalid {kind} patterns"), e))?;
        Ok(Self {
            any: patterns.iter().any(|p| p == MATCH_ALL_PATTERN),
            patterns,
            set,
        })
    }

    fn extend<I>(&self, kind: &str, patterns: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut all = self.patterns.clone();
        all.extend(patterns.into_iter().map(Into::into));
        Self::compile(kind, all)
    }

    fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    fn is_match(&self, target: &str) -> bool {
        self.any || self.set.is_match(target)
    }
}

/// What a sandbox lets privileged actions do
///
/// Property and resource reads need both the kind and a matching allow-list
/// entry. [`grant`](Self::grant) opens a kind for every target;
/// [`grant_properties`](Self::grant_properties) and
/// [`grant_resources`](Self::grant_resources) open it for matching targets only.
#[derive(Debug, Clone)]
pub struct SandboxPolicy {
    granted: BTreeSet<OperationKind>,
    properties: AllowList,
    resources: AllowList,
}

impl SandboxPolicy {
    /// Build a policy from granted kinds and glob allow-lists
    pub fn new<K, P, R>(granted: K, property_patterns: P, resource_patterns: R) -> Result<Self>
    where
        K: IntoIterator<Item = OperationKind>,
        P: IntoIterator,
        P::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Ok(Self {
            granted: granted.into_iter().collect(),
            properties: AllowList::none().extend("property", property_patterns)?,
            resources: AllowList::none().extend("resource", resource_patterns)?,
        })
    }

    /// Policy granting every operation on every target
    pub fn permissive() -> Self {
        Self {
            granted: OperationKind::ALL.into_iter().collect(),
            properties: AllowList::any(),
            resources: AllowList::any(),
        }
    }

    /// Policy refusing every operation
    pub fn deny_all() -> Self {
        Self {
            granted: BTreeSet::new(),
            properties: AllowList::none(),
            resources: AllowList::none(),
        }
    }

    /// Build the policy described by the security configuration section
    pub fn from_config(config: &SecurityConfig) -> Result<Self> {
        Self::new(
            config.granted.iter().copied(),
            config.property_patterns.iter().cloned(),
            config.resource_patterns.iter().cloned(),
        )
    }

    /// Grant one more operation kind on every target
    ///
    /// Allow-lists that already hold patterns are kept as they are.
    pub fn grant(mut self, kind: OperationKind) -> Self {
        self.granted.insert(kind);
        match kind {
            OperationKind::ReadProperty if self.properties.is_empty() => {
                self.properties = AllowList::any();
            }
            OperationKind::ReadResource if self.resources.is_empty() => {
                self.resources = AllowList::any();
            }
            _ => {}
        }
        self
    }

    /// Grant property reads for names matching `patterns`
    pub fn grant_properties<I>(mut self, patterns: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.granted.insert(OperationKind::ReadProperty);
        self.properties = self.properties.extend("property", patterns)?;
        Ok(self)
    }

    /// Grant resource reads for paths matching `patterns`
    pub fn grant_resources<I>(mut self, patterns: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.granted.insert(OperationKind::ReadResource);
        self.resources = self.resources.extend("resource", patterns)?;
        Ok(self)
    }

    pub fn granted(&self) -> impl Iterator<Item = OperationKind> + '_ {
        self.granted.iter().copied()
    }

    pub fn property_patterns(&self) -> &[String] {
        &self.properties.patterns
    }

    pub fn resource_patterns(&self) -> &[String] {
        &self.resources.patterns
    }

    /// Whether `operation` may run under this policy
    pub fn permits(&self, operation: &PrivilegedOperation<'_>) -> bool {
        if !self.granted.contains(&operation.kind()) {
            return false;
        }
        match operation {
            PrivilegedOperation::ReadProperty { name } => self.properties.is_match(name),
            PrivilegedOperation::ReadResource { path, .. } => self.resources.is_match(path),
            _ => true,
        }
    }
}

/// Executor enforcing a [`SandboxPolicy`]
#[derive(Debug, Clone)]
pub struct SandboxedExecutor {
    policy: SandboxPolicy,
}

impl SandboxedExecutor {
    pub fn new(policy: SandboxPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &SandboxPolicy {
        &self.policy
    }
}

impl PrivilegedExecutor for SandboxedExecutor {
    fn is_sandboxed(&self) -> bool {
        true
    }

    fn execute(
        &self,
        operation: &PrivilegedOperation<'_>,
        action: &mut dyn FnMut() -> Result<()>,
    ) -> Result<()> {
        if !self.policy.permits(operation) {
            warn!(operation = %operation, "Sandbox refused privileged operation");
            return Err(Error::permission_denied(operation.to_string()));
        }

        trace!(operation = %operation, "Running privileged operation");
        let _frame = PrivilegedFrame::enter();
        action()
    }
}
