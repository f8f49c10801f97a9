//! Resolution Pipeline
//!
//! Turns a service name into an implementation identifier by trying, in
//! fixed precedence order:
//!
//! 1. the first line of `META-INF/services/<service>` in the loading context
//!    (memoized per context, including negative results),
//! 2. the `[services]` table of the runtime-home configuration file,
//! 3. a process property named after the service,
//! 4. the default supplied by the caller.
//!
//! The first strategy that yields a non-blank identifier wins. A services
//! file whose first line is blank counts as "not found" and resolution falls
//! through; a services file that cannot be opened or read fails the
//! resolution with [`Error::MalformedResource`].

use std::io::{self, BufRead, BufReader};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};
use wsspi_domain::{
    BoxError, CachedLookup, ContextRef, Error, ExternalConfigSource, LoadingContext, PrivilegedExecutor,
    PrivilegedOperation, PropertySource, ResolutionCacheProvider, ResolutionStrategy,
    ResolvedProvider, ResourcePath, Result, ServiceName, run_privileged,
};

/// Which strategies a pipeline runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineProfile {
    /// Services file, system property, default
    Api,
    /// Services file, external configuration, system property, default
    #[default]
    Spi,
}

impl PipelineProfile {
    /// Strategies enabled by this profile, in precedence order
    pub fn strategies(self) -> Vec<ResolutionStrategy> {
        match self {
            Self::Api => vec![
                ResolutionStrategy::ServicesFile,
                ResolutionStrategy::SystemProperty,
                ResolutionStrategy::Default,
            ],
            Self::Spi => ResolutionStrategy::ORDER.to_vec(),
        }
    }
}

/// Ordered, short-circuiting resolution of service names
#[derive(Debug, Clone)]
pub struct ResolutionPipeline {
    strategies: Vec<ResolutionStrategy>,
    cache: Arc<dyn ResolutionCacheProvider>,
    executor: Arc<dyn PrivilegedExecutor>,
    properties: Arc<dyn PropertySource>,
    external: Option<Arc<dyn ExternalConfigSource>>,
}

impl ResolutionPipeline {
    /// Create a pipeline running every strategy
    ///
    /// The external configuration strategy is skipped until a source is
    /// attached with [`with_external_config`](Self::with_external_config).
    pub fn new(
        cache: Arc<dyn ResolutionCacheProvider>,
        executor: Arc<dyn PrivilegedExecutor>,
        properties: Arc<dyn PropertySource>,
    ) -> Self {
        Self {
            strategies: ResolutionStrategy::ORDER.to_vec(),
            cache,
            executor,
            properties,
            external: None,
        }
    }

    /// Restrict the pipeline to the given strategies
    ///
    /// Order is always precedence order regardless of the input order.
    pub fn with_strategies<I>(mut self, strategies: I) -> Self
    where
        I: IntoIterator<Item = ResolutionStrategy>,
    {
        let mut strategies: Vec<_> = strategies.into_iter().collect();
        strategies.sort_unstable();
        strategies.dedup();
        self.strategies = strategies;
        self
    }

    /// Restrict the pipeline to the strategies of a profile
    pub fn with_profile(self, profile: PipelineProfile) -> Self {
        self.with_strategies(profile.strategies())
    }

    /// Attach the external configuration source
    pub fn with_external_config(mut self, source: Arc<dyn ExternalConfigSource>) -> Self {
        self.external = Some(source);
        self
    }

    /// Strategies that will be consulted, in order
    pub fn strategies(&self) -> &[ResolutionStrategy] {
        &self.strategies
    }

    /// Executor used for privileged operations
    pub fn executor(&self) -> &Arc<dyn PrivilegedExecutor> {
        &self.executor
    }

    /// Resolve `service` within `context`
    pub fn resolve(
        &self,
        service: &ServiceName,
        default: Option<&str>,
        context: &ContextRef,
    ) -> Result<ResolvedProvider> {
        for &strategy in &self.strategies {
            let found = match strategy {
                ResolutionStrategy::ServicesFile => self.from_services_file(service, context)?,
                ResolutionStrategy::ExternalConfig => self.from_external_config(service)?,
                ResolutionStrategy::SystemProperty => self.from_system_property(service)?,
                ResolutionStrategy::Default => non_blank(default),
            };

            if let Some(implementation) = found {
                debug!(
                    service = %service,
                    implementation = %implementation,
                    strategy = %strategy,
                    context = context.name(),
                    "Resolved service implementation"
                );
                return Ok(ResolvedProvider::Resolved {
                    implementation,
                    strategy,
                });
            }
        }

        debug!(
            service = %service,
            context = context.name(),
            attempted = %ResolutionStrategy::join(&self.strategies),
            "No implementation resolved"
        );
        Ok(ResolvedProvider::Unresolved)
    }

    fn from_services_file(
        &self,
        service: &ServiceName,
        context: &ContextRef,
    ) -> Result<Option<String>> {
        let path = service.services_path();
        if let Some(cached) = self.cache.get(context, &path) {
            trace!(path = %path, context = context.name(), "Services file lookup cache hit");
            return Ok(cached.into_option());
        }

        let lookup = run_privileged(
            self.executor.as_ref(),
            PrivilegedOperation::ReadResource {
                context: context.name(),
                path: path.as_str(),
            },
            || read_first_line(context.as_ref(), &path),
        )?;

        self.cache.put(context, &path, lookup.clone());
        Ok(lookup.into_option())
    }

    fn from_external_config(&self, service: &ServiceName) -> Result<Option<String>> {
        match &self.external {
            Some(source) => Ok(non_blank(
                source.lookup(service, self.executor.as_ref())?.as_deref(),
            )),
            None => Ok(None),
        }
    }

    fn from_system_property(&self, service: &ServiceName) -> Result<Option<String>> {
        let value = run_privileged(
            self.executor.as_ref(),
            PrivilegedOperation::ReadProperty {
                name: service.as_str(),
            },
            || Ok(self.properties.property(service.as_str())),
        )?;
        Ok(non_blank(value.as_deref()))
    }
}

/// Read the implementation identifier from the first line of a services file
///
/// The stream is opened and dropped within this call, so concurrent
/// resolutions never share a handle.
fn read_first_line(context: &dyn LoadingContext, path: &ResourcePath) -> Result<CachedLookup> {
    let stream = match context.open_resource(path.as_str()) {
        Ok(Some(stream)) => stream,
        Ok(None) => return Ok(CachedLookup::Absent),
        Err(Error::Io { message, source }) => {
            return Err(Error::malformed_resource(
                path.as_str(),
                into_io_error(message, source),
            ));
        }
        Err(e) => return Err(e),
    };

    let mut line = String::new();
    BufReader::new(stream)
        .read_line(&mut line)
        .map_err(|e| Error::malformed_resource(path.as_str(), e))?;

    match non_blank(Some(line.as_str())) {
        Some(name) => Ok(CachedLookup::Found(name)),
        None => {
            warn!(
                path = %path,
                context = context.name(),
                "Services file has a blank first line, treating as not found"
            );
            Ok(CachedLookup::Absent)
        }
    }
}

fn into_io_error(message: String, source: Option<BoxError>) -> io::Error {
    match source.map(|source| source.downcast::<io::Error>()) {
        Some(Ok(e)) => *e,
        Some(Err(other)) => io::Error::other(format!("{message}: {other}")),
        None => io::Error::other(message),
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
