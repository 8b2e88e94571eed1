pub mod config;
pub mod logging;

pub mod downloader;
pub mod error;
pub mod eventbrite;
pub mod http;
pub mod naming;
pub mod pipeline;
pub mod streamyard;

pub use error::{Error, Result};
