//! Repository implementations module.
//!
//! - `local`: In-memory snapshot implementation, used in production (loaded
//!   from a JSON export at startup) and in tests
pub mod local;

pub use local::LocalRepository;
