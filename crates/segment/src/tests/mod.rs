//! Tests for the `segment` facade.


mod behaviour;
