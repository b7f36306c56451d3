//! Types that represent the core data model, such as `Bill` and `Amount`.
mod amount;
mod bill;
mod file;

pub use amount::{Amount, AmountError};
pub use bill::{parse_pct, Bill, BillStatus, DEFAULT_PCT, EXPENSE_TYPES};
pub use file::{ReceiptFormat, SelectedFile, FILE_FORMAT_ERROR};
