//! Runtime configuration.
//!
//! Built explicitly with a bon builder or read from environment variables.

use std::str::FromStr;

use bon::bon;
use sigkern_codegen::DEFAULT_COMPLEX_HEADER;
use sigkern_device::CompileOptions;

use crate::error::{ConfigSnafu, Error, Result};

/// Language standard every kernel is compiled with.
pub const LANGUAGE_STANDARD_FLAG: &str = "-std=c++11";

/// Fast-math flag every kernel is compiled with.
pub const FAST_MATH_FLAG: &str = "-use_fast_math";

/// Which compiler backend a context uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Backend {
    /// Host reference kernels (no accelerator needed).
    #[default]
    Host,
    /// NVRTC on the given CUDA device.
    Cuda { device_id: usize },
}

impl FromStr for Backend {
    type Err = Error;

    /// Parse `host`, `cuda` or `cuda:N` (case-insensitive).
    fn from_str(s: &str) -> Result<Self> {
        let s = s.to_lowercase();
        let mut parts = s.splitn(2, ':');
        match (parts.next(), parts.next()) {
            (Some("host"), None) => Ok(Backend::Host),
            (Some("cuda"), None) => Ok(Backend::Cuda { device_id: 0 }),
            (Some("cuda"), Some(id)) => id
                .parse()
                .map(|device_id| Backend::Cuda { device_id })
                .map_err(|_| ConfigSnafu { reason: format!("invalid CUDA device id '{id}'") }.build()),
            _ => ConfigSnafu { reason: format!("unknown backend '{s}'") }.fail(),
        }
    }
}

/// Configuration for a [`crate::KernelContext`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub backend: Backend,
    /// Extra include directories handed to the compiler.
    pub include_paths: Vec<String>,
    /// Include line spliced into complex-typed kernels.
    pub complex_header: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self { backend: Backend::Host, include_paths: Vec::new(), complex_header: DEFAULT_COMPLEX_HEADER.to_string() }
    }
}

#[bon]
impl RuntimeConfig {
    #[builder]
    pub fn builder(
        #[builder(default)] backend: Backend,
        #[builder(default)] include_paths: Vec<String>,
        #[builder(into, default = DEFAULT_COMPLEX_HEADER.to_string())] complex_header: String,
    ) -> Self {
        Self { backend, include_paths, complex_header }
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// * `SIGKERN_BACKEND` - `host` (default), `cuda` or `cuda:N`
    /// * `SIGKERN_INCLUDE_PATH` - `:`-separated include directories
    /// * `SIGKERN_COMPLEX_HEADER` - replacement for the complex include line
    pub fn from_env() -> Result<Self> {
        let backend = match std::env::var("SIGKERN_BACKEND") {
            Ok(value) => value.parse()?,
            Err(_) => Backend::default(),
        };
        let include_paths = std::env::var("SIGKERN_INCLUDE_PATH")
            .map(|paths| paths.split(':').filter(|p| !p.is_empty()).map(str::to_string).collect())
            .unwrap_or_default();
        let complex_header =
            std::env::var("SIGKERN_COMPLEX_HEADER").unwrap_or_else(|_| DEFAULT_COMPLEX_HEADER.to_string());

        Ok(Self { backend, include_paths, complex_header })
    }

    /// Compiler options: the fixed flag pair plus configured include paths.
    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            flags: vec![LANGUAGE_STANDARD_FLAG.to_string(), FAST_MATH_FLAG.to_string()],
            include_paths: self.include_paths.clone(),
        }
    }
}
