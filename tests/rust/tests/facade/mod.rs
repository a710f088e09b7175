//! Process-wide facade tests
//!
//! The facade is global state, so this target holds a single test that walks
//! the whole lifecycle in order.
