use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug)]
pub enum ClientError {
    Http(reqwest::Error),
    Status { status: StatusCode, body: String },
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Http(e) => write!(f, "request failed: {}", e),
            ClientError::Status { status, body } => {
                write!(f, "service returned status {}: {}", status, body)
            }
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Http(e)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub status: String,
    pub event_type: String,
    #[serde(default)]
    pub amount: Option<Value>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub capture_id: Option<String>,
    #[serde(default)]
    pub related_order_id: Option<String>,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookAck {
    pub status: String,
    pub order_id: String,
    pub event_type: String,
    pub processed_status: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Health {
    pub status: String,
    pub service: String,
    pub timestamp: String,
    pub environment: String,
    pub total_orders: usize,
    pub version: String,
}

pub struct OrderClient {
    client: Client,
    base_url: String,
}

impl OrderClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn health(&self) -> Result<Health, ClientError> {
        let resp = self
            .client
            .get(format!("{}/api/health", self.base_url))
            .send()
            .await?;
        Ok(check(resp).await?.json().await?)
    }

    pub async fn list_orders(&self) -> Result<Vec<Order>, ClientError> {
        let resp = self
            .client
            .get(format!("{}/api/orders", self.base_url))
            .send()
            .await?;
        Ok(check(resp).await?.json().await?)
    }

    /// Fetch one order; `Ok(None)` when the service has never seen it.
    pub async fn get_order(&self, id: &str) -> Result<Option<Order>, ClientError> {
        let resp = self
            .client
            .get(format!("{}/api/orders/{}", self.base_url, id))
            .send()
            .await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(check(resp).await?.json().await?))
    }

    /// Deliver a raw webhook event, as the payment processor would.
    pub async fn send_webhook(&self, event: &Value) -> Result<WebhookAck, ClientError> {
        let resp = self
            .client
            .post(format!("{}/api/webhook/paypal", self.base_url))
            .json(event)
            .send()
            .await?;
        Ok(check(resp).await?.json().await?)
    }
}

async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ClientError::Status { status, body })
}
