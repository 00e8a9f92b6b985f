//! Download execution for vget

pub mod executor;
pub mod options;
pub mod request;
pub mod template;

pub use executor::*;
pub use options::*;
pub use request::*;
pub use template::*;
