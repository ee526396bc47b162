//! Crate-level test suite: end-to-end pipeline checks and property tests for
//! the interpolation engine.
