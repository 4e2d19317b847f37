//! Fail-fast precondition validation with classified failures.
//!
//! Wrap a named value in an [`Arg`] handle, thread it through a chain of
//! checks, and get back either the value or a [`Fault`] that says exactly
//! what went wrong, about which argument, the first time a condition is
//! violated.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌─────────────┐
//! │   arg.rs    │────▶│  checks.rs   │────▶│  fault.rs   │
//! │  (Arg<T>,   │     │ (the check   │     │ (FaultKind, │
//! │   check)    │     │  catalog)    │     │  classify)  │
//! └─────────────┘     └──────────────┘     └─────────────┘
//!        │                   │
//!        ▼                   ▼
//! ┌─────────────────────────────────────────────────────┐
//! │                     compat.rs                        │
//! │  (Compatible, Inspect, process-wide predicate cache) │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! | Module      | Responsibility                                      |
//! |-------------|-----------------------------------------------------|
//! | `arg`       | value/name/state carrier, chain-step contract       |
//! | `fault`     | failure kinds, downgrade rule, message templating   |
//! | `compat`    | memoized type-compatibility predicates              |
//! | `checks`    | bundled presence/range/shape/type/custom checks     |
//! | `contracts` | debug-mode assertions over the core invariants      |
//!
//! # Usage
//!
//! ```
//! use guardpost::{Arg, Fault};
//!
//! fn connect(host: &str, port: u16) -> Result<(), Fault> {
//!     let host = Arg::new(host, "host").trimmed_not_empty()?.into_value();
//!     let port = Arg::new(port, "port").at_least(1024)?.into_value();
//!     let _ = (host, port);
//!     Ok(())
//! }
//!
//! assert!(connect("example.com", 8080).is_ok());
//! assert_eq!(connect("", 8080).unwrap_err().name, "host");
//! ```
//!
//! Chains are synchronous and fail-fast: the first violated check stops
//! everything behind it. The only shared state in the crate is the
//! type-compatibility cache, which is safe to consult from any number of
//! threads (see [`compat`]).

// Module declarations
mod arg;
mod checks;
pub mod compat;
pub mod contracts;
mod fault;
pub mod testing;

// Re-exports for public API
pub use arg::Arg;
pub use compat::{is_compatible, Compatible, Inspect, Presence, TypeRelation};
pub use fault::{classify, Fault, FaultKind};
