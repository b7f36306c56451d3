mod api;
pub mod args;
pub mod commands;
mod config;
pub mod containers;
mod error;
pub mod model;
pub mod router;
mod routes;
mod session;
#[cfg(test)]
mod test;
mod utils;
pub mod views;

pub use api::{store, Bills, HttpStore, MockCalls, MockStore, Mode, Store};
pub use config::Config;
pub use error::Error;
pub use error::Result;
pub use routes::Route;
pub use session::{Session, UserType};
