// Path: crates/api/src/error/mod.rs
// Re-export all core error types from the central types crate.
pub use poi_types::error::{
    AssemblyError, CryptoError, ErrorCode, IntegrityError, RewriteError, SigningError,
    StalenessError, ValidationError, WireError,
};
pub use poi_types::Result;
