//! The bills list controller.

use crate::containers::Navigate;
use crate::model::Bill;
use crate::views::bill_proof;
use crate::{Result, Route, Store};
use chrono::NaiveDate;
use maud::Markup;
use std::sync::Arc;
use tracing::{debug, warn};

/// Fetches the bills for the list page and handles its buttons.
pub struct BillList {
    store: Option<Arc<dyn Store>>,
    on_navigate: Navigate,
}

impl BillList {
    pub fn new(
        store: Option<Arc<dyn Store>>,
        on_navigate: impl FnMut(Route) + Send + 'static,
    ) -> Self {
        Self {
            store,
            on_navigate: Box::new(on_navigate),
        }
    }

    /// Returns the bills from the store, most recent first. Without a store there are no bills.
    ///
    /// # Errors
    /// Returns the store's error unchanged.
    pub async fn get_bills(&self) -> Result<Vec<Bill>> {
        let Some(store) = &self.store else {
            debug!("No store, no bills");
            return Ok(Vec::new());
        };
        let mut bills = store.bills().list().await?;
        for bill in &bills {
            if NaiveDate::parse_from_str(&bill.date, "%Y-%m-%d").is_err() {
                warn!(
                    "Bill {} has a corrupted date '{}'",
                    bill.id().unwrap_or_default(),
                    bill.date
                );
            }
        }
        // ISO dates sort chronologically as strings
        bills.sort_by(|a, b| b.date.cmp(&a.date));
        debug!("Fetched {} bills", bills.len());
        Ok(bills)
    }

    /// The "new bill" button leads to the form.
    pub fn handle_click_new_bill(&mut self) {
        (self.on_navigate)(Route::NewBill);
    }

    /// The eye icon of a bill opens its receipt in a modal that is `modal_width` pixels wide.
    pub fn handle_click_icon_eye(&self, file_url: &str, modal_width: u32) -> Markup {
        bill_proof(file_url, modal_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockStore;
    use std::sync::Mutex;

    #[tokio::test]
    async fn test_get_bills_most_recent_first() {
        let store: Arc<dyn Store> = Arc::new(MockStore::with_fixtures().unwrap());
        let list = BillList::new(Some(store), |_| {});
        let bills = list.get_bills().await.unwrap();
        let dates: Vec<&str> = bills.iter().map(|b| b.date.as_str()).collect();
        assert_eq!(
            dates,
            vec!["2004-04-04", "2003-03-03", "2002-02-02", "2001-01-01"]
        );
    }

    #[tokio::test]
    async fn test_get_bills_error() {
        let store = Arc::new(MockStore::with_fixtures().unwrap());
        store.fail_next("Erreur 500").await;
        let list = BillList::new(Some(store.clone() as Arc<dyn Store>), |_| {});
        let err = list.get_bills().await.unwrap_err();
        assert_eq!(err.to_string(), "Erreur 500");
    }

    #[tokio::test]
    async fn test_get_bills_without_store() {
        let list = BillList::new(None, |_| {});
        assert!(list.get_bills().await.unwrap().is_empty());
    }

    #[test]
    fn test_click_new_bill_navigates() {
        let visited = Arc::new(Mutex::new(Vec::new()));
        let recorder = visited.clone();
        let mut list = BillList::new(None, move |route| recorder.lock().unwrap().push(route));
        list.handle_click_new_bill();
        assert_eq!(*visited.lock().unwrap(), vec![Route::NewBill]);
    }

    #[test]
    fn test_click_icon_eye() {
        let list = BillList::new(None, |_| {});
        let html = list
            .handle_click_icon_eye("https://localhost:3456/images/test.jpg", 600)
            .into_string();
        assert!(html.contains(r#"src="https://localhost:3456/images/test.jpg""#));
        assert!(html.contains(r#"width="300""#));
    }
}
