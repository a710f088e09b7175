//! Rotation tests
//!
//! Drives a file-backed logger past its size limit and checks the files left
//! on disk.
