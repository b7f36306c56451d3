//! Command handlers for the billed CLI.
//!
//! This module contains implementations for all CLI subcommands.

mod init;
mod new_bill;
mod render;

use crate::Route;
use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, info};

pub use init::init;
pub use new_bill::new_bill;
pub use render::{bills, render};

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data to the command line.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to `info!` and the structured data (if it exists) as JSON to `debug!`.
    pub fn print(&self) {
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }
}

/// A rendered page.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    route: Option<Route>,
    html: String,
}

impl Page {
    pub fn new(route: Option<Route>, html: impl Into<String>) -> Self {
        Self {
            route,
            html: html.into(),
        }
    }

    /// The route that is displayed. `None` when nothing is.
    pub fn route(&self) -> Option<Route> {
        self.route
    }

    pub fn html(&self) -> &str {
        &self.html
    }
}

impl Out<Page> {
    /// Print the message like `print` does and write the page's HTML to stdout.
    pub fn print_page(&self) {
        self.print();
        if let Some(page) = self.structure() {
            println!("{}", page.html());
        }
    }
}
