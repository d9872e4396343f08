//! Unit tests for the dormouse CLI
//!
//! These tests exercise the public library API with stubbed ports and run
//! fast without external I/O.

mod handle_wait;
mod mocks;
mod scenarios;
