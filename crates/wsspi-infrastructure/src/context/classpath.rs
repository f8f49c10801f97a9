//! Classpath Context
//!
//! A named loading context made of filesystem resource roots, in-memory
//! resources and implementation entries. Lookups delegate to the parent
//! context first, the way hierarchical class loaders do, so a child can add
//! to what it inherits but never shadow it.
//!
//! ## Usage
//!
//! ```ignore
//! let deployment = ClasspathContext::new("deployment.war")
//!     .with_parent(ClasspathContext::system().into_ref())
//!     .with_root("/srv/app/WEB-INF/classes")
//!     .into_ref();
//! ```

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use wsspi_application::find_registered;
use wsspi_domain::{ContextRef, Error, ImplementationEntry, LoadingContext, Result};

use crate::constants::SYSTEM_CONTEXT_NAME;

#[derive(Debug, Default)]
pub struct ClasspathContext {
    name: String,
    parent: Option<ContextRef>,
    roots: Vec<PathBuf>,
    resources: HashMap<String, Vec<u8>>,
    implementations: HashMap<&'static str, &'static ImplementationEntry>,
    include_registry: bool,
}

impl ClasspathContext {
    /// Create an empty context that does not see the compiled-in registry
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// The process system context: the compiled-in registry and nothing else
    pub fn system() -> Self {
        Self::new(SYSTEM_CONTEXT_NAME).with_registry(true)
    }

    pub fn with_parent(mut self, parent: ContextRef) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Add a directory that resource paths are resolved against
    pub fn with_root<P: AsRef<Path>>(mut self, root: P) -> Self {
        self.roots.push(root.as_ref().to_path_buf());
        self
    }

    pub fn with_roots<I, P>(self, roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        roots.into_iter().fold(self, Self::with_root)
    }

    /// Add an in-memory resource
    pub fn with_resource<S, B>(mut self, path: S, content: B) -> Self
    where
        S: Into<String>,
        B: Into<Vec<u8>>,
    {
        self.resources.insert(path.into(), content.into());
        self
    }

    /// Make an implementation visible only from this context and its children
    pub fn with_implementation(mut self, entry: &'static ImplementationEntry) -> Self {
        self.implementations.insert(entry.name, entry);
        self
    }

    /// Whether implementations registered with `IMPLEMENTATIONS` are visible
    pub fn with_registry(mut self, include: bool) -> Self {
        self.include_registry = include;
        self
    }

    pub fn parent(&self) -> Option<&ContextRef> {
        self.parent.as_ref()
    }

    pub fn into_ref(self) -> ContextRef {
        Arc::new(self)
    }

    fn open_local(&self, path: &str) -> Result<Option<Box<dyn Read + Send>>> {
        if let Some(bytes) = self.resources.get(path) {
            return Ok(Some(Box::new(Cursor::new(bytes.clone()))));
        }

        for root in &self.roots {
            let candidate = root.join(path);
            match File::open(&candidate) {
                Ok(file) if candidate.is_file() => return Ok(Some(Box::new(file))),
                Ok(_) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(Error::io_with_source(
                        format!("Failed to open resource {}", candidate.display()),
                        e,
                    ));
                }
            }
        }
        Ok(None)
    }
}

impl LoadingContext for ClasspathContext {
    fn name(&self) -> &str {
        &self.name
    }

    fn open_resource(&self, path: &str) -> Result<Option<Box<dyn Read + Send>>> {
        validate_resource_path(path)?;
        if let Some(parent) = &self.parent {
            if let Some(stream) = parent.open_resource(path)? {
                return Ok(Some(stream));
            }
        }
        self.open_local(path)
    }

    fn find_implementation(&self, name: &str) -> Result<Option<&'static ImplementationEntry>> {
        if let Some(parent) = &self.parent {
            if let Some(entry) = parent.find_implementation(name)? {
                return Ok(Some(entry));
            }
        }
        if let Some(entry) = self.implementations.get(name) {
            return Ok(Some(*entry));
        }
        Ok(self.include_registry.then(|| find_registered(name)).flatten())
    }
}

/// Resource paths are relative and may not climb out of a root
fn validate_resource_path(path: &str) -> Result<()> {
    let escapes = Path::new(path)
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if path.is_empty() || escapes {
        return Err(Error::invalid_argument(format!(
            "Resource path must be relative and stay inside its root: '{path}'"
        )));
    }
    Ok(())
}
