//! Unit tests for `segment_parser`.

mod cursor_tests;
