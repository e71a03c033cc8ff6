//! Pullscout runtime SDK facade.
//!
//! Depend on this crate via `cargo add pullscout`. It bundles the runtime
//! crates behind feature flags so downstream users can enable or disable
//! components as needed.

#![warn(missing_docs, clippy::pedantic)]

/// Re-export the structural schema model for convenience.
pub use pullscout_schema as schema;

/// Tool registration and invocation (enabled by `tools` feature).
#[cfg(feature = "tools")]
pub use pullscout_tools as tools;

/// Model adapters (enabled by `adapters` feature).
#[cfg(feature = "adapters")]
pub use pullscout_adapters as adapters;

/// GitHub REST client and its tools (enabled by `github` feature).
#[cfg(feature = "github")]
pub use pullscout_github as github;

/// Review agent loop (enabled by `agent` feature).
#[cfg(feature = "agent")]
pub use pullscout_agent as agent;
