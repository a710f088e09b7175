//! Level helper tests
//!
//! Name/value mapping and lenient parsing through the public API.

mod parsing;
