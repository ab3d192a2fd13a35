//! Unit tests for `segment_core` types.
