//! Unit tests for roles and the permission guard.
