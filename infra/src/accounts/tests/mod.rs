//! Unit tests for account store implementations
