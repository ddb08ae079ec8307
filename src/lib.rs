pub mod cli;
pub mod config;
pub mod error;
pub mod locator;
pub mod net;
pub mod report;
pub mod results;

pub use tt_rating_common as common;
