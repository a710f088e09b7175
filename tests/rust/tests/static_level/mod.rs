//! Compile-time level cap tests
//!
//! This package enables `tracing/max_level_info`, which strips debug events
//! from `tracing`'s own macros. Facade calls must still honor the runtime
//! level alone.
