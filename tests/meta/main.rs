//! Repository layout checks for the test suite
