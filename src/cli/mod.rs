//! Command line interface for vget

pub mod args;
pub mod output;

pub use args::*;
