//! External extraction tool integration

pub mod traits;
pub mod ytdlp;

pub use traits::*;
pub use ytdlp::*;
