//! Implements the `Store` trait using in-memory data for testing purposes.
//!
//! Note: this is compiled even in the "production" version of this app so that we can run the whole
//! app, top-to-bottom, without a bills API.

use crate::api::{Bills, Store};
use crate::model::{Bill, SelectedFile};
use crate::utils::generate_bill_id;
use crate::Result;
use anyhow::{anyhow, Context};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;
use tracing::trace;

const MOCK_FILE_HOST: &str = "https://localhost:3456/images";

/// How many times each operation of a `MockStore` has been called.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct MockCalls {
    pub bills: usize,
    pub list: usize,
    pub create: usize,
    pub update: usize,
}

/// An implementation of the `Store` trait that keeps bills in memory, keyed by id. It counts calls
/// and can be told to fail its next call, so that tests can observe how controllers use it.
#[derive(Debug, Default)]
pub struct MockStore {
    bills: MockBills,
    bills_calls: AtomicUsize,
}

#[derive(Debug, Default)]
struct MockBills {
    state: Mutex<MockState>,
}

#[derive(Debug, Default)]
struct MockState {
    records: BTreeMap<String, Bill>,
    fail_next: Option<String>,
    calls: MockCalls,
}

impl MockState {
    fn injected_failure(&mut self) -> Result<()> {
        match self.fail_next.take() {
            Some(message) => Err(anyhow!(message)),
            None => Ok(()),
        }
    }
}

impl MockStore {
    /// Create a new `MockStore` holding `bills`. Bills without an id are given one.
    pub fn new(bills: impl IntoIterator<Item = Bill>) -> Self {
        let records = bills
            .into_iter()
            .map(|mut bill| {
                let id = bill.id.get_or_insert_with(generate_bill_id).clone();
                (id, bill)
            })
            .collect();
        Self {
            bills: MockBills {
                state: Mutex::new(MockState {
                    records,
                    ..MockState::default()
                }),
            },
            bills_calls: AtomicUsize::new(0),
        }
    }

    /// Create a `MockStore` seeded with the fixture bills from this module.
    pub fn with_fixtures() -> Result<Self> {
        let bills: Vec<Bill> =
            serde_json::from_str(FIXTURE_BILLS).context("Unable to parse the fixture bills")?;
        Ok(Self::new(bills))
    }

    /// The next call to `list`, `create` or `update` fails with `message`.
    pub async fn fail_next(&self, message: impl Into<String>) {
        self.bills.state.lock().await.fail_next = Some(message.into());
    }

    pub async fn calls(&self) -> MockCalls {
        let mut calls = self.bills.state.lock().await.calls;
        calls.bills = self.bills_calls.load(Ordering::SeqCst);
        calls
    }

    /// Returns the stored bill with `id`, if any.
    pub async fn get(&self, id: &str) -> Option<Bill> {
        self.bills.state.lock().await.records.get(id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.bills.state.lock().await.records.len()
    }
}

impl Store for MockStore {
    fn bills(&self) -> &dyn Bills {
        self.bills_calls.fetch_add(1, Ordering::SeqCst);
        &self.bills
    }
}

#[async_trait::async_trait]
impl Bills for MockBills {
    async fn list(&self) -> Result<Vec<Bill>> {
        let mut state = self.state.lock().await;
        state.calls.list += 1;
        state.injected_failure()?;
        Ok(state.records.values().cloned().collect())
    }

    async fn create(&self, bill: &Bill, file: &SelectedFile) -> Result<Bill> {
        let mut state = self.state.lock().await;
        state.calls.create += 1;
        state.injected_failure()?;
        let id = generate_bill_id();
        trace!("Creating mock bill {id} with receipt {}", file.name());
        let created = Bill {
            id: Some(id.clone()),
            file_url: format!("{MOCK_FILE_HOST}/{}", file.name()),
            file_name: file.name().to_string(),
            ..bill.clone()
        };
        state.records.insert(id, created.clone());
        Ok(created)
    }

    async fn update(&self, bill: &Bill) -> Result<Bill> {
        let mut state = self.state.lock().await;
        state.calls.update += 1;
        state.injected_failure()?;
        let id = bill
            .id()
            .context("A bill must have an id to be updated")?
            .to_string();
        match state.records.get_mut(&id) {
            Some(existing) => {
                *existing = bill.clone();
                Ok(existing.clone())
            }
            None => Err(anyhow!("Erreur 404")),
        }
    }
}

/// Seed bill data.
const FIXTURE_BILLS: &str = r##"[
  {
    "id": "47qAXb6fIm2zOKkLzMro",
    "vat": "80",
    "fileUrl": "https://localhost:3456/images/preview-facture-free-201801-pdf-1.jpg",
    "status": "pending",
    "type": "Hôtel et logement",
    "commentary": "séminaire billed",
    "name": "encore",
    "fileName": "preview-facture-free-201801-pdf-1.jpg",
    "date": "2004-04-04",
    "amount": 400,
    "commentAdmin": "ok",
    "email": "a@a",
    "pct": 20
  },
  {
    "id": "BeKy5Mo4jkmdfPGYpTxZ",
    "vat": "",
    "amount": 100,
    "name": "test1",
    "fileName": "1592770761.jpeg",
    "commentary": "plop",
    "pct": 20,
    "type": "Transports",
    "email": "a@a",
    "fileUrl": "https://localhost:3456/images/1592770761.jpeg",
    "date": "2001-01-01",
    "status": "refused",
    "commentAdmin": "en fait non"
  },
  {
    "id": "UIUZtnPQvnbFnB0ozvJh",
    "name": "test3",
    "email": "a@a",
    "type": "Services en ligne",
    "vat": "60",
    "pct": 20,
    "commentAdmin": "bon bah d'accord",
    "amount": 300,
    "status": "accepted",
    "date": "2003-03-03",
    "commentary": "",
    "fileName": "facture-client-php-exportee-dans-document-pdf-enregistre-sur-disque-dur.png",
    "fileUrl": "https://localhost:3456/images/facture-client-php-exportee-dans-document-pdf-enregistre-sur-disque-dur.png"
  },
  {
    "id": "qcCK3SzECmaZAGRrHjaC",
    "name": "test2",
    "email": "a@a",
    "type": "Restaurants et bars",
    "vat": "40",
    "pct": 20,
    "commentAdmin": "pas la bonne facture",
    "amount": 200,
    "status": "refused",
    "date": "2002-02-02",
    "commentary": "test2",
    "fileName": "preview-facture-free-201801-pdf-1.jpg",
    "fileUrl": "https://localhost:3456/images/preview-facture-free-201801-pdf-1.jpg"
  }
]"##;
