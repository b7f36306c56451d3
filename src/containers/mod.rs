//! Controllers that react to what the user does on a page and talk to the store.

mod bill_list;
mod new_bill;

use crate::Route;

pub use bill_list::BillList;
pub use new_bill::{NewBill, SubmitOutcome};

/// The navigation callback handed to controllers by the app shell. It replaces the displayed view
/// with the one for the given route.
pub type Navigate = Box<dyn FnMut(Route) + Send>;
