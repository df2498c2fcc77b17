//! Parser integration tests
//!
//! These tests drive the public `parse`/`serialize` entry points against a
//! realistic ticket schema.

mod helpers;

mod grammar;
mod roundtrip;
mod semantic;
