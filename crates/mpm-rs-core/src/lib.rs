pub mod error;
pub use error::Result;
pub use error::Error;

pub mod release;
pub use release::Release;

pub mod platform;
pub use platform::Platform;

pub mod catalog;

pub mod config;
pub use config::Config;

pub mod installer;
