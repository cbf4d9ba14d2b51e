//! End-to-end test harness for the Dog API.
//!
//! - [`api`]: one method per endpoint, returning the buffered response whatever its status
//! - [`assert`]: JSON-pointer assertions that log status and body on failure
//! - [`suite`]: independent scenarios and a concurrent runner
//! - [`config`], [`log`], [`cmd`]: suite-wide settings, tracing setup and the CLI

pub mod api;
pub mod assert;
pub mod cmd;
pub mod config;
pub mod errors;
pub mod http;
pub mod log;
pub mod suite;
pub mod utils;
