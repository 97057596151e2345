//! Integration test suite for fmax.
//!
//! Runs the same inputs through every driver (state machine, iterator,
//! async stream, push subscriber) and checks they agree with each other
//! and with the falling-max rules.

pub mod helpers;
