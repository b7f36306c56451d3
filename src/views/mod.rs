//! HTML views, rendered with `maud`.
//!
//! Each view is a pure function from a typed view-model to `Markup`. Elements that automated tests
//! or the app shell need to find carry a `data-testid` attribute whose value is one of the
//! constants in `hooks`.

mod bills_ui;
mod format;
mod layout;
mod new_bill_ui;
mod pages;

pub use bills_ui::{bill_proof, bills_ui, BillsView};
pub use format::format_date;
pub use layout::{vertical_layout, Icon, Nav, ACTIVE_ICON};
pub use new_bill_ui::{new_bill_ui, Field, NewBillForm};
pub use pages::{error_page, loading_page};

/// Values of the `data-testid` attributes.
pub mod hooks {
    pub const FORM_NEW_BILL: &str = "form-new-bill";
    pub const EXPENSE_TYPE: &str = "expense-type";
    pub const EXPENSE_NAME: &str = "expense-name";
    pub const DATEPICKER: &str = "datepicker";
    pub const AMOUNT: &str = "amount";
    pub const VAT: &str = "vat";
    pub const PCT: &str = "pct";
    pub const COMMENTARY: &str = "commentary";
    pub const FILE: &str = "file";
    pub const ERROR_MESSAGE_FILE: &str = "errorMessageFile";
    pub const ICON_WINDOW: &str = "icon-window";
    pub const ICON_MAIL: &str = "icon-mail";
    pub const ERROR_MESSAGE: &str = "error-message";
    pub const BTN_NEW_BILL: &str = "btn-new-bill";
    pub const TBODY: &str = "tbody";
    pub const ICON_EYE: &str = "icon-eye";
}
