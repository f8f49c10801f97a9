//! Resolution pipeline configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use wsspi_application::PipelineProfile;

/// Which strategies run and where the runtime home is
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// `spi` runs the external configuration strategy, `api` does not
    #[serde(default)]
    pub profile: PipelineProfile,

    /// Runtime home used when the `wsspi.home` property is not set
    #[serde(default)]
    pub runtime_home: Option<PathBuf>,
}
