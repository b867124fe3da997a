//! # Fuzzcache Core
//!
//! Converts fuzz seed corpora between the Go fuzzing engine's native cache
//! (one content-addressed file per seed) and consolidated `.fuzz` corpus
//! files (one quoted seed per line) meant to be committed as test fixtures.
//!
//! ## Modules
//!
//! - `constants`: On-disk format markers and naming constants
//! - `error`: Error types (CorpusError, QuoteError)
//! - `quote`: Quoted-payload codec shared by both formats
//! - `native`: Native cache entry reader and writer
//! - `corpus`: Consolidated corpus reader and writer
//! - `progress`: Reporting collaborator used by the orchestrators
//! - `convert`: Pack and unpack orchestrators

#![warn(missing_docs)]

pub mod constants;
pub mod convert;
pub mod corpus;
pub mod error;
pub mod native;
pub mod progress;
pub mod quote;

// Re-export commonly used types
pub use convert::{pack, unpack, Summary, TargetSummary, UnpackOptions};
pub use error::{CorpusError, QuoteError};
pub use progress::{NoProgress, Progress};

/// A single seed input: an arbitrary byte sequence.
pub type Seed = bytes::Bytes;

/// Result type alias for fuzzcache operations
pub type Result<T> = core::result::Result<T, CorpusError>;
