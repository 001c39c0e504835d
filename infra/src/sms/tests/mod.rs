//! Unit tests for SMS module

pub mod mambo_tests;
