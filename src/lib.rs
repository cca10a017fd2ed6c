pub mod config;
pub mod maven;
pub mod util;
