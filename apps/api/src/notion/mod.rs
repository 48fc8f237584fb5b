/// Notion record store: the single point of entry for all Notion API calls
/// in jobtrail. The pipeline consumes the `RecordStore` trait; `NotionClient`
/// is the production implementation, bound to one database at construction.
use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod filter;
pub mod properties;
pub mod record;

pub use filter::FilterExpression;
pub use properties::{PropertyValue, PropertyWrite};
pub use record::Record;

const NOTION_API_URL: &str = "https://api.notion.com/v1";
const NOTION_VERSION: &str = "2022-06-28";

// Database schema field names. The store is the source of truth for these;
// the classifier and filter prompts must emit them verbatim.
pub const FIELD_JOB: &str = "Job";
pub const FIELD_COMPANY: &str = "Company";
pub const FIELD_STATUS: &str = "Status";
pub const FIELD_DATE_OF_APPLICATION: &str = "Date of application";
pub const FIELD_REFERENCE: &str = "Reference";
pub const FIELD_LAST_UPDATED: &str = "Last updated time";

pub type PropertyMap = BTreeMap<String, PropertyWrite>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// A page as returned by query/create/update: id plus type-tagged
/// property values keyed by field name.
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    pub id: String,
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyValue>,
}

impl Page {
    /// Scalar view of one field, if the page has it.
    pub fn scalar(&self, field: &str) -> Option<String> {
        self.properties.get(field).map(PropertyValue::as_scalar)
    }
}

/// The record store as the pipeline sees it. One call per operation, no
/// retries; store faults surface immediately as terminal pipeline errors.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn query(&self, filter: &FilterExpression) -> Result<Vec<Page>, StoreError>;
    async fn create(&self, properties: PropertyMap) -> Result<Page, StoreError>;
    async fn update(&self, page_id: &str, properties: PropertyMap) -> Result<Page, StoreError>;
}

#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    filter: &'a FilterExpression,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    results: Vec<Page>,
}

#[derive(Debug, Serialize)]
struct CreateRequest<'a> {
    parent: Parent<'a>,
    properties: &'a PropertyMap,
}

#[derive(Debug, Serialize)]
struct Parent<'a> {
    database_id: &'a str,
}

#[derive(Debug, Serialize)]
struct UpdateRequest<'a> {
    properties: &'a PropertyMap,
}

#[derive(Debug, Deserialize)]
struct NotionErrorBody {
    message: String,
}

/// Production `RecordStore` over the Notion REST API.
#[derive(Clone)]
pub struct NotionClient {
    client: Client,
    token: String,
    database_id: String,
}

impl NotionClient {
    pub fn new(token: String, database_id: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            token,
            database_id,
        }
    }

    fn request(&self, method: reqwest::Method, url: String) -> reqwest::RequestBuilder {
        self.client
            .request(method, url)
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
            .header("content-type", "application/json")
    }
}

/// Maps a non-2xx response to a typed API error, preferring the message
/// field from the Notion error body over the raw payload.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<NotionErrorBody>(&body)
        .map(|e| e.message)
        .unwrap_or(body);
    Err(StoreError::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl RecordStore for NotionClient {
    async fn query(&self, filter: &FilterExpression) -> Result<Vec<Page>, StoreError> {
        let url = format!("{NOTION_API_URL}/databases/{}/query", self.database_id);
        let response = self
            .request(reqwest::Method::POST, url)
            .json(&QueryRequest { filter })
            .send()
            .await?;
        let response = check_status(response).await?;
        let body: QueryResponse = response.json().await?;
        debug!("Notion query returned {} pages", body.results.len());
        Ok(body.results)
    }

    async fn create(&self, properties: PropertyMap) -> Result<Page, StoreError> {
        let url = format!("{NOTION_API_URL}/pages");
        let response = self
            .request(reqwest::Method::POST, url)
            .json(&CreateRequest {
                parent: Parent {
                    database_id: &self.database_id,
                },
                properties: &properties,
            })
            .send()
            .await?;
        let response = check_status(response).await?;
        let page: Page = response.json().await?;
        debug!("Notion page created: {}", page.id);
        Ok(page)
    }

    async fn update(&self, page_id: &str, properties: PropertyMap) -> Result<Page, StoreError> {
        let url = format!("{NOTION_API_URL}/pages/{page_id}");
        let response = self
            .request(reqwest::Method::PATCH, url)
            .json(&UpdateRequest {
                properties: &properties,
            })
            .send()
            .await?;
        let response = check_status(response).await?;
        let page: Page = response.json().await?;
        debug!("Notion page updated: {}", page.id);
        Ok(page)
    }
}
