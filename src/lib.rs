pub mod auth;
pub mod cli;
pub mod config;
pub mod console;
pub mod db;
pub mod domain;
pub mod error;
pub mod export;

pub use config::Config;
pub use console::{Console, Controller, SessionEnd};
pub use db::{Repository, Session};
pub use domain::{RollNo, SearchField, Student, StudentFields};
pub use error::AppError;
