//! Unit tests for the user context.

mod directory_tests;
