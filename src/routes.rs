use serde::{Deserialize, Serialize};

/// The screens an employee can navigate to. Each route is identified by its path, which is what
/// the navigation callback receives and what `Display`/`FromStr` produce and parse.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Route {
    #[serde(rename = "#employee/bills")]
    Bills,
    #[serde(rename = "#employee/bill/new")]
    NewBill,
}

serde_plain::derive_display_from_serialize!(Route);
serde_plain::derive_fromstr_from_deserialize!(Route);

impl Route {
    pub fn path(&self) -> String {
        self.to_string()
    }
}
