// src/identity/build.rs

/// Source of the build identity reported on every health response.
pub trait Versioner: Send + Sync {
    fn version(&self) -> String;
    fn checksum(&self) -> String;
}

/// Version and checksum baked in at compile time, optionally overridden
/// from configuration.
#[derive(Debug, Clone)]
pub struct BuildInfo {
    version: String,
    checksum: String,
}

impl BuildInfo {
    pub fn new(version: impl Into<String>, checksum: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            checksum: checksum.into(),
        }
    }

    /// Package version plus the `BUILD_CHECKSUM` env var seen by the compiler.
    pub fn from_build_env() -> Self {
        Self::new(
            env!("CARGO_PKG_VERSION"),
            option_env!("BUILD_CHECKSUM").unwrap_or_default(),
        )
    }

    pub fn with_overrides(mut self, version: Option<String>, checksum: Option<String>) -> Self {
        if let Some(version) = version {
            self.version = version;
        }
        if let Some(checksum) = checksum {
            self.checksum = checksum;
        }
        self
    }
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self::from_build_env()
    }
}

impl Versioner for BuildInfo {
    fn version(&self) -> String {
        self.version.clone()
    }

    fn checksum(&self) -> String {
        self.checksum.clone()
    }
}

/// Snapshot of a [`Versioner`] taken once when the service is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceIdentity {
    pub version: String,
    pub checksum: String,
}

impl ServiceIdentity {
    pub fn from_versioner(versioner: &dyn Versioner) -> Self {
        Self {
            version: versioner.version(),
            checksum: versioner.checksum(),
        }
    }
}
