//! The new-bill form controller.

use crate::containers::Navigate;
use crate::model::{parse_pct, Amount, Bill, BillStatus, SelectedFile, FILE_FORMAT_ERROR};
use crate::views::{new_bill_ui, Field, NewBillForm, Nav};
use crate::{Result, Route, Session, Store};
use anyhow::Context;
use maud::Markup;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// What happened when the form was submitted without the store failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The store saved the bill and the user was sent to the bills list.
    Saved(Bill),
    /// A new bill needs an accepted receipt. Nothing was sent to the store and the file error
    /// message is displayed.
    MissingReceipt,
    /// The form could not be turned into a bill, or there is nowhere to send it. Nothing was sent
    /// to the store and the form keeps what was typed.
    Invalid(String),
}

/// Handles the file input and the submission of the new-bill form.
///
/// The form state lives here; the page is rendered from it with `render`.
pub struct NewBill {
    session: Session,
    store: Option<Arc<dyn Store>>,
    on_navigate: Navigate,
    form: NewBillForm,
    file: Option<SelectedFile>,
    /// The bill being edited. `None` when creating a new one.
    editing: Option<Bill>,
}

impl NewBill {
    /// A controller for an empty form that creates a new bill.
    pub fn new(
        session: Session,
        store: Option<Arc<dyn Store>>,
        on_navigate: impl FnMut(Route) + Send + 'static,
    ) -> Self {
        Self {
            session,
            store,
            on_navigate: Box::new(on_navigate),
            form: NewBillForm::default(),
            file: None,
            editing: None,
        }
    }

    /// A controller for a form prefilled with `bill`. Submitting it updates the bill.
    pub fn edit(
        bill: Bill,
        session: Session,
        store: Option<Arc<dyn Store>>,
        on_navigate: impl FnMut(Route) + Send + 'static,
    ) -> Self {
        let mut controller = Self::new(session, store, on_navigate);
        controller.form = NewBillForm::from_bill(&bill);
        controller.editing = Some(bill);
        controller
    }

    pub fn form(&self) -> &NewBillForm {
        &self.form
    }

    /// Types `value` into `field`.
    pub fn set_value(&mut self, field: Field, value: impl Into<String>) {
        self.form.set_value(field, value);
    }

    /// The receipt that will be sent with the bill, if an accepted one was selected.
    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn render(&self, nav: &Nav) -> Markup {
        new_bill_ui(nav, &self.form)
    }

    /// Handles a change of the file input. Only the first file is considered.
    ///
    /// An accepted image clears the error message and is kept for submission. Anything else shows
    /// the format error. In both cases the input keeps displaying the selected file name.
    pub fn handle_change_file(&mut self, files: Vec<SelectedFile>) {
        let Some(file) = files.into_iter().next() else {
            debug!("The file selection was cleared");
            self.form.set_value(Field::File, "");
            self.form.clear_error_message();
            self.file = None;
            return;
        };

        self.form.set_value(Field::File, file.name());
        if file.is_accepted() {
            debug!("Accepted receipt {} ({})", file.name(), file.mime_type());
            self.form.clear_error_message();
            self.file = Some(file);
        } else {
            warn!(
                "Rejected receipt {} with type '{}'",
                file.name(),
                file.mime_type()
            );
            self.form.set_error_message(FILE_FORMAT_ERROR);
            self.file = None;
        }
    }

    /// Handles the submission of the form.
    ///
    /// A new bill is created with the selected receipt, an edited bill is updated. Once the store
    /// has answered, the navigation callback is called with the bills list route.
    ///
    /// Problems found before reaching the store, such as an amount that is not a number, are
    /// reported as `SubmitOutcome::Invalid`.
    ///
    /// # Errors
    /// Returns the store's error unchanged when it fails; no navigation happens.
    pub async fn handle_submit(&mut self) -> Result<SubmitOutcome> {
        let bill = match self.bill_from_form() {
            Ok(bill) => bill,
            Err(e) => return Ok(invalid(e.to_string())),
        };
        let Some(store) = self.store.clone() else {
            return Ok(invalid("There is no store to send the bill to"));
        };

        let result = match (&self.editing, &self.file) {
            (Some(_), file) => {
                if let Some(file) = file {
                    warn!(
                        "The receipt of an existing bill cannot be replaced, ignoring {}",
                        file.name()
                    );
                }
                debug!("Updating bill {:?}", bill.id);
                store.bills().update(&bill).await
            }
            (None, Some(file)) => {
                debug!("Creating a bill with receipt {}", file.name());
                store.bills().create(&bill, file).await
            }
            (None, None) => {
                info!("A new bill needs a jpg, jpeg or png receipt");
                self.form.set_error_message(FILE_FORMAT_ERROR);
                return Ok(SubmitOutcome::MissingReceipt);
            }
        };

        let saved = match result {
            Ok(saved) => saved,
            Err(e) => {
                error!("Unable to save the bill: {e}");
                return Err(e);
            }
        };

        info!("Saved bill {}", saved.id().unwrap_or_default());
        (self.on_navigate)(Route::Bills);
        Ok(SubmitOutcome::Saved(saved))
    }

    /// Gathers the form values into a bill.
    fn bill_from_form(&self) -> Result<Bill> {
        let raw_amount = self.form.value(Field::Amount);
        let amount = Amount::from_str(raw_amount)
            .with_context(|| format!("The amount '{raw_amount}' is not a number"))?;

        let base = self.editing.clone().unwrap_or_default();
        Ok(Bill {
            email: self.session.email().to_string(),
            expense_type: self.form.selected_expense_type().to_string(),
            name: self.form.value(Field::ExpenseName).to_string(),
            amount,
            date: self.form.value(Field::Date).to_string(),
            vat: self.form.value(Field::Vat).to_string(),
            pct: parse_pct(self.form.value(Field::Pct)),
            commentary: self.form.value(Field::Commentary).to_string(),
            status: BillStatus::Pending,
            ..base
        })
    }
}

fn invalid(message: impl Into<String>) -> SubmitOutcome {
    let message = message.into();
    warn!("The bill cannot be sent: {message}");
    SubmitOutcome::Invalid(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockStore;
    use crate::model::EXPENSE_TYPES;
    use std::sync::Mutex;

    type Visited = Arc<Mutex<Vec<Route>>>;

    fn controller(store: Option<Arc<MockStore>>) -> (NewBill, Visited) {
        let visited: Visited = Arc::default();
        let recorder = visited.clone();
        let store = store.map(|s| s as Arc<dyn Store>);
        let controller = NewBill::new(Session::employee("e@e"), store, move |route| {
            recorder.lock().unwrap().push(route)
        });
        (controller, visited)
    }

    fn image(name: &str, mime_type: &str) -> SelectedFile {
        SelectedFile::new(name, mime_type, b"newFile".to_vec())
    }

    fn fill(controller: &mut NewBill) {
        controller.set_value(Field::ExpenseType, "Hôtel et logement");
        controller.set_value(Field::ExpenseName, "encore");
        controller.set_value(Field::Date, "2004-04-04");
        controller.set_value(Field::Amount, "400");
        controller.set_value(Field::Vat, "80");
        controller.set_value(Field::Pct, "");
        controller.set_value(Field::Commentary, "test post bill");
    }

    #[test]
    fn test_accepted_images_clear_the_error() {
        for (name, mime_type) in [
            ("testImage.jpeg", "image/jpeg"),
            ("testImage.jpg", "image/jpg"),
            ("testImage.png", "image/png"),
        ] {
            let (mut controller, _) = controller(None);
            controller.handle_change_file(vec![image("textFile.txt", "text/txt")]);
            assert_eq!(controller.form().error_message(), FILE_FORMAT_ERROR);

            controller.handle_change_file(vec![image(name, mime_type)]);
            assert_eq!(controller.form().error_message(), "");
            assert_eq!(controller.form().value(Field::File), name);
            assert_eq!(controller.file().unwrap().name(), name);
        }
    }

    #[test]
    fn test_text_file_shows_the_error() {
        let (mut controller, _) = controller(None);
        controller.handle_change_file(vec![image("textFile.txt", "text/txt")]);
        assert_eq!(
            controller.form().error_message(),
            "Seuls les formats de fichiers (jpg, jpeg, png) sont autorisés"
        );
        // The input still shows the selection, but it will not be sent
        assert_eq!(controller.form().value(Field::File), "textFile.txt");
        assert!(controller.file().is_none());

        let html = controller.render(&Nav::default()).into_string();
        assert!(html.contains(&format!(
            r#"data-testid="errorMessageFile">{FILE_FORMAT_ERROR}</div>"#
        )));
    }

    #[test]
    fn test_clearing_the_selection() {
        let (mut controller, _) = controller(None);
        controller.handle_change_file(vec![image("textFile.txt", "text/txt")]);
        controller.handle_change_file(Vec::new());
        assert_eq!(controller.form().error_message(), "");
        assert_eq!(controller.form().value(Field::File), "");
        assert!(controller.file().is_none());
    }

    #[tokio::test]
    async fn test_submit_creates_the_bill_and_navigates() {
        let store = Arc::new(MockStore::default());
        let (mut controller, visited) = controller(Some(store.clone()));
        fill(&mut controller);
        controller.handle_change_file(vec![image("test.jpg", "image/jpeg")]);

        let outcome = controller.handle_submit().await.unwrap();

        let SubmitOutcome::Saved(bill) = outcome else {
            panic!("expected the bill to be saved");
        };
        assert!(bill.id.is_some());
        assert_eq!(bill.status, BillStatus::Pending);
        assert_eq!(bill.email, "e@e");
        assert_eq!(bill.expense_type, "Hôtel et logement");
        assert_eq!(bill.amount, Amount::from(400));
        assert_eq!(bill.pct, 20);
        assert_eq!(bill.commentary, "test post bill");
        assert_eq!(bill.file_name, "test.jpg");

        let calls = store.calls().await;
        assert_eq!(calls.create, 1);
        assert_eq!(calls.update, 0);
        assert_eq!(*visited.lock().unwrap(), vec![Route::Bills]);
    }

    #[tokio::test]
    async fn test_submit_empty_form_with_receipt_uses_defaults() {
        let store = Arc::new(MockStore::default());
        let (mut controller, _) = controller(Some(store.clone()));
        controller.handle_change_file(vec![image("test.png", "image/png")]);

        let SubmitOutcome::Saved(bill) = controller.handle_submit().await.unwrap() else {
            panic!("expected the bill to be saved");
        };
        assert_eq!(bill.expense_type, EXPENSE_TYPES[0]);
        assert!(bill.amount.is_zero());
        assert_eq!(bill.pct, 20);
    }

    #[tokio::test]
    async fn test_submit_without_receipt_does_not_call_the_store() {
        let store = Arc::new(MockStore::default());
        let (mut controller, visited) = controller(Some(store.clone()));
        fill(&mut controller);
        controller.handle_change_file(vec![image("textFile.txt", "text/txt")]);

        let outcome = controller.handle_submit().await.unwrap();

        assert_eq!(outcome, SubmitOutcome::MissingReceipt);
        assert_eq!(controller.form().error_message(), FILE_FORMAT_ERROR);
        assert_eq!(store.calls().await, Default::default());
        assert!(visited.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_failure_is_returned_without_navigating() {
        for message in ["Erreur 404", "Erreur 500"] {
            let store = Arc::new(MockStore::default());
            store.fail_next(message).await;
            let (mut controller, visited) = controller(Some(store.clone()));
            fill(&mut controller);
            controller.handle_change_file(vec![image("test.jpg", "image/jpeg")]);

            let err = controller.handle_submit().await.unwrap_err();

            assert_eq!(err.to_string(), message);
            assert!(visited.lock().unwrap().is_empty());
            assert_eq!(store.len().await, 0);
        }
    }

    #[tokio::test]
    async fn test_submit_without_store() {
        let (mut controller, visited) = controller(None);
        controller.handle_change_file(vec![image("test.jpg", "image/jpeg")]);
        let outcome = controller.handle_submit().await.unwrap();
        assert_eq!(
            outcome,
            SubmitOutcome::Invalid("There is no store to send the bill to".to_string())
        );
        assert!(visited.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_bad_amount() {
        let store = Arc::new(MockStore::default());
        let (mut controller, _) = controller(Some(store.clone()));
        controller.handle_change_file(vec![image("test.jpg", "image/jpeg")]);
        controller.set_value(Field::Amount, "beaucoup");
        let outcome = controller.handle_submit().await.unwrap();
        assert_eq!(
            outcome,
            SubmitOutcome::Invalid("The amount 'beaucoup' is not a number".to_string())
        );
        assert_eq!(controller.form().value(Field::Amount), "beaucoup");
        assert_eq!(store.calls().await, Default::default());
    }

    #[tokio::test]
    async fn test_submit_edited_bill_updates_it() {
        let store = Arc::new(MockStore::with_fixtures().unwrap());
        let bill = store.get("47qAXb6fIm2zOKkLzMro").await.unwrap();
        let visited: Visited = Arc::default();
        let recorder = visited.clone();
        let mut controller = NewBill::edit(
            bill,
            Session::employee("a@a"),
            Some(store.clone() as Arc<dyn Store>),
            move |route| recorder.lock().unwrap().push(route),
        );
        controller.set_value(Field::Commentary, "test post bill");

        let SubmitOutcome::Saved(saved) = controller.handle_submit().await.unwrap() else {
            panic!("expected the bill to be saved");
        };

        assert_eq!(saved.id(), Some("47qAXb6fIm2zOKkLzMro"));
        assert_eq!(saved.status, BillStatus::Pending);
        assert_eq!(saved.commentary, "test post bill");
        assert_eq!(saved.comment_admin.as_deref(), Some("ok"));
        let calls = store.calls().await;
        assert_eq!(calls.update, 1);
        assert_eq!(calls.create, 0);
        assert_eq!(*visited.lock().unwrap(), vec![Route::Bills]);
    }
}
