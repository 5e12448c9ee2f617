//! Body buffering configuration.
//!
//! `BodyConfig` controls how [`Body::read_to_end`](crate::net::Body::read_to_end)
//! drains a response stream into memory. The defaults never limit the body
//! size and read in 8 KiB chunks.
//!
//! ```rust
//! use gosub_net::net::BodyConfig;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = BodyConfig::builder()
//!     .max_body_bytes(1024 * 1024)
//!     .read_chunk_size(4096)
//!     .build()?; // returns Result<BodyConfig, BodyConfigError>
//! assert_eq!(cfg.max_body_bytes, Some(1024 * 1024));
//! # Ok(()) }
//! ```
//!
//! # Errors
//!
//! Builder validation returns [`BodyConfigError`] when the chunk size is zero
//! or the body limit is set to zero.

use std::fmt;

const DEFAULT_READ_CHUNK_SIZE: usize = 8 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyConfig {
    /// Maximum number of bytes buffered from a body. `None` means unlimited.
    pub max_body_bytes: Option<u64>,
    /// Size of the scratch buffer used for each read call
    pub read_chunk_size: usize,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: None,
            read_chunk_size: DEFAULT_READ_CHUNK_SIZE,
        }
    }
}

impl BodyConfig {
    pub fn builder() -> BodyConfigBuilder {
        BodyConfigBuilder::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct BodyConfigBuilder {
    inner: BodyConfig,
}

impl BodyConfigBuilder {
    #[inline]
    fn map(mut self, f: impl FnOnce(&mut BodyConfig)) -> Self {
        f(&mut self.inner);
        self
    }

    pub fn max_body_bytes(self, n: u64) -> Self { self.map(|c| c.max_body_bytes = Some(n)) }
    pub fn unlimited(self) -> Self { self.map(|c| c.max_body_bytes = None) }
    pub fn read_chunk_size(self, n: usize) -> Self { self.map(|c| c.read_chunk_size = n) }

    /// Validate and build the final config.
    pub fn build(self) -> Result<BodyConfig, BodyConfigError> {
        validate(&self.inner)?;
        Ok(self.inner)
    }
}

// ---------- Validation ----------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyConfigError {
    ZeroChunkSize,
    ZeroBodyLimit,
}

impl fmt::Display for BodyConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyConfigError::ZeroChunkSize =>
                write!(f, "read_chunk_size must be at least 1"),
            BodyConfigError::ZeroBodyLimit =>
                write!(f, "max_body_bytes must be at least 1 (use unlimited() to remove the limit)"),
        }
    }
}
impl std::error::Error for BodyConfigError {}

fn validate(c: &BodyConfig) -> Result<(), BodyConfigError> {
    if c.read_chunk_size == 0 {
        return Err(BodyConfigError::ZeroChunkSize);
    }
    if c.max_body_bytes == Some(0) {
        return Err(BodyConfigError::ZeroBodyLimit);
    }
    Ok(())
}
