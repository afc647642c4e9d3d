#![warn(clippy::all, clippy::pedantic)]

pub mod components_tests;

// Import test utilities
#[cfg(test)]
pub mod test_utils;
