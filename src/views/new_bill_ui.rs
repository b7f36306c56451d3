use crate::model::{Bill, EXPENSE_TYPES};
use crate::views::{hooks, vertical_layout, Nav};
use maud::{html, Markup};

/// The inputs of the new-bill form.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Field {
    ExpenseType,
    ExpenseName,
    Date,
    Amount,
    Vat,
    Pct,
    Commentary,
    File,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::ExpenseType,
        Field::ExpenseName,
        Field::Date,
        Field::Amount,
        Field::Vat,
        Field::Pct,
        Field::Commentary,
        Field::File,
    ];
}

/// The state of the new-bill form: the raw text of every input and the content of the error
/// message under the file input.
///
/// Values are kept exactly as typed; parsing happens when the form is submitted. An empty
/// expense type means the first option of the select is selected.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct NewBillForm {
    expense_type: String,
    expense_name: String,
    date: String,
    amount: String,
    vat: String,
    pct: String,
    commentary: String,
    file: String,
    error_message: String,
}

impl NewBillForm {
    /// A form prefilled with an existing bill.
    pub fn from_bill(bill: &Bill) -> Self {
        Self {
            expense_type: bill.expense_type.clone(),
            expense_name: bill.name.clone(),
            date: bill.date.clone(),
            amount: bill.amount.value().normalize().to_string(),
            vat: bill.vat.clone(),
            pct: bill.pct.to_string(),
            commentary: bill.commentary.clone(),
            file: bill.file_name.clone(),
            error_message: String::new(),
        }
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::ExpenseType => &self.expense_type,
            Field::ExpenseName => &self.expense_name,
            Field::Date => &self.date,
            Field::Amount => &self.amount,
            Field::Vat => &self.vat,
            Field::Pct => &self.pct,
            Field::Commentary => &self.commentary,
            Field::File => &self.file,
        }
    }

    pub fn set_value(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::ExpenseType => self.expense_type = value,
            Field::ExpenseName => self.expense_name = value,
            Field::Date => self.date = value,
            Field::Amount => self.amount = value,
            Field::Vat => self.vat = value,
            Field::Pct => self.pct = value,
            Field::Commentary => self.commentary = value,
            Field::File => self.file = value,
        }
    }

    /// The expense type that is selected, falling back to the first option.
    pub fn selected_expense_type(&self) -> &str {
        if self.expense_type.is_empty() {
            EXPENSE_TYPES[0]
        } else {
            &self.expense_type
        }
    }

    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    pub fn set_error_message(&mut self, message: impl Into<String>) {
        self.error_message = message.into();
    }

    pub fn clear_error_message(&mut self) {
        self.error_message.clear();
    }
}

/// The new-bill page.
pub fn new_bill_ui(nav: &Nav, form: &NewBillForm) -> Markup {
    let selected = form.selected_expense_type();
    html! {
        div class="layout" {
            (vertical_layout(nav))
            div class="content" {
                div class="content-header" {
                    div class="content-title" { "Envoyer une note de frais" }
                }
                div class="form-newbill-container content-inner" {
                    form data-testid=(hooks::FORM_NEW_BILL) {
                        div class="row" {
                            div class="col-md-6" {
                                div class="col-half" {
                                    label for="expense-type" class="bold-label" { "Type de dépense" }
                                    select id="expense-type" required class="form-control blue-border" data-testid=(hooks::EXPENSE_TYPE) {
                                        @for expense_type in EXPENSE_TYPES {
                                            option selected[*expense_type == selected] { (expense_type) }
                                        }
                                    }
                                }
                                div class="col-half" {
                                    label for="expense-name" class="bold-label" { "Nom de la dépense" }
                                    input id="expense-name" type="text" class="form-control blue-border" data-testid=(hooks::EXPENSE_NAME) placeholder="Vol Paris Londres" value=(form.value(Field::ExpenseName));
                                }
                                div class="col-half" {
                                    label for="datepicker" class="bold-label" { "Date" }
                                    input id="datepicker" required type="date" class="form-control blue-border" data-testid=(hooks::DATEPICKER) value=(form.value(Field::Date));
                                }
                                div class="col-half" {
                                    label for="amount" class="bold-label" { "Montant TTC " }
                                    input id="amount" required type="number" class="form-control blue-border input-icon input-icon-right" data-testid=(hooks::AMOUNT) placeholder="348" value=(form.value(Field::Amount));
                                }
                                div class="col-half-row" {
                                    div class="flex-col" {
                                        label for="vat" class="bold-label" { "TVA" }
                                        input id="vat" type="number" class="form-control blue-border" data-testid=(hooks::VAT) placeholder="70" value=(form.value(Field::Vat));
                                    }
                                    div class="flex-col" {
                                        input id="pct" required type="number" class="form-control blue-border" data-testid=(hooks::PCT) placeholder="20" value=(form.value(Field::Pct));
                                        " %"
                                    }
                                }
                            }
                            div class="col-md-6" {
                                div class="col-half" {
                                    label for="commentary" class="bold-label" { "Commentaire" }
                                    textarea id="commentary" class="form-control blue-border" data-testid=(hooks::COMMENTARY) rows="3" {
                                        (form.value(Field::Commentary))
                                    }
                                }
                                div class="col-half" {
                                    label for="file" class="bold-label" { "Justificatif" }
                                    input id="file" required type="file" accept=".jpg,.jpeg,.png" class="form-control blue-border" data-testid=(hooks::FILE);
                                    div class="error-message" data-testid=(hooks::ERROR_MESSAGE_FILE) {
                                        (form.error_message())
                                    }
                                }
                            }
                        }
                        div class="row" {
                            div class="col-md-6" {
                                div class="col-half" {
                                    button type="submit" id="btn-send-bill" class="btn btn-primary" { "Envoyer" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
