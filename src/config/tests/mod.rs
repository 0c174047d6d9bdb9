//! Unit tests for configuration loading and precedence.
//!
//! - `helpers`: shared test utilities
//! - `precedence`: layer precedence tests
//! - `field_resolution`: token, timeout, identity, and option resolution
//! - `short_flags`: single-letter command-line flags

mod helpers;
mod precedence;
