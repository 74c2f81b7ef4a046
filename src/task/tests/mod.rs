//! Unit tests for the task bounded context.

mod request_tests;
