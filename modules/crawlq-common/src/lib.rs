pub mod config;
pub mod error;
pub mod normalize;

pub use config::Config;
pub use error::{Result, SamplerError};
pub use normalize::*;
