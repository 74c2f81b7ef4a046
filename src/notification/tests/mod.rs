//! Unit tests for notification rendering, dispatch, and the inbox.
