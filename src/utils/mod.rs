//! Utility functions for vget

pub mod url;

pub use url::*;
