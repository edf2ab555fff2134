pub mod config;
pub mod error;
pub mod games;
pub mod handler;
pub mod model;
pub mod pbp;
pub mod today;
pub mod upstream;
