//! Implements the `Store` trait using `reqwest` to talk to the bills REST API.

use crate::api::{Bills, Store};
use crate::model::{Bill, SelectedFile};
use crate::Result;
use anyhow::{anyhow, bail, Context};
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use tracing::{debug, trace};
use url::Url;

const BILLS: &str = "bills";

/// Talks to the bills API at a base URL such as `http://localhost:5678/`.
pub struct HttpStore {
    bills: HttpBills,
}

impl HttpStore {
    /// Create a new `HttpStore` for the API at `api_url`. Requests are authenticated with `jwt`
    /// when it is given.
    pub fn new(api_url: &str, jwt: Option<&str>) -> Result<Self> {
        let mut base = Url::parse(api_url)
            .with_context(|| format!("Invalid bills API URL '{api_url}'"))?;
        // Without a trailing slash, joining would replace the last path segment
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }
        Ok(Self {
            bills: HttpBills {
                client: reqwest::Client::new(),
                base,
                jwt: jwt.map(str::to_string),
            },
        })
    }
}

impl Store for HttpStore {
    fn bills(&self) -> &dyn Bills {
        &self.bills
    }
}

struct HttpBills {
    client: reqwest::Client,
    base: Url,
    jwt: Option<String>,
}

/// What the API answers when a receipt is uploaded.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Upload {
    file_url: String,
    key: String,
}

impl HttpBills {
    fn url(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .with_context(|| format!("Unable to build the URL for '{path}'"))
    }

    /// The URL of one bill. The id is a single path segment, whatever characters it holds.
    fn bill_url(&self, id: &str) -> Result<Url> {
        let mut url = self.url(BILLS)?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("The bills API URL '{}' cannot have a path", self.base))?
            .push(id);
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.jwt {
            Some(jwt) => request.bearer_auth(jwt),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = self
            .authorize(request)
            .send()
            .await
            .context("Failed to send request to the bills API")?;
        check_status(response.status())?;
        Ok(response)
    }

    async fn patch(&self, id: &str, bill: &Bill) -> Result<Bill> {
        let url = self.bill_url(id)?;
        trace!("PATCH {url}");
        let response = self.send(self.client.patch(url).json(bill)).await?;
        response
            .json()
            .await
            .context("Failed to parse the updated bill")
    }
}

#[async_trait::async_trait]
impl Bills for HttpBills {
    async fn list(&self) -> Result<Vec<Bill>> {
        let url = self.url(BILLS)?;
        trace!("GET {url}");
        let response = self.send(self.client.get(url)).await?;
        response
            .json()
            .await
            .context("Failed to parse the list of bills")
    }

    async fn create(&self, bill: &Bill, file: &SelectedFile) -> Result<Bill> {
        // The API stores the receipt first and hands back the key of the new bill, which is then
        // filled in with a PATCH
        let part = Part::bytes(file.content().to_vec())
            .file_name(file.name().to_string())
            .mime_str(file.mime_type())
            .with_context(|| format!("Invalid MIME type '{}'", file.mime_type()))?;
        let form = Form::new()
            .text("email", bill.email.clone())
            .part("file", part);
        let url = self.url(BILLS)?;
        trace!("POST {url}");
        let upload: Upload = self
            .send(self.client.post(url).multipart(form))
            .await?
            .json()
            .await
            .context("Failed to parse the receipt upload response")?;
        debug!("Receipt {} stored as bill {}", file.name(), upload.key);

        let created = Bill {
            id: Some(upload.key.clone()),
            file_url: upload.file_url,
            file_name: file.name().to_string(),
            ..bill.clone()
        };
        self.patch(&upload.key, &created).await
    }

    async fn update(&self, bill: &Bill) -> Result<Bill> {
        let id = bill.id().context("A bill must have an id to be updated")?;
        self.patch(id, bill).await
    }
}

/// Any non-success status becomes an error whose message is shown verbatim to the user.
fn check_status(status: StatusCode) -> Result<()> {
    if !status.is_success() {
        bail!("Erreur {}", status.as_u16());
    }
    Ok(())
}
