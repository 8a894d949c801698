use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::domain::{repositories::payments::PaymentGateway, value_objects::payments::PaymentOrder};

const ORDER_CURRENCY: &str = "INR";

/// Minimal Razorpay Orders client built on reqwest. Only order creation is
/// needed here; the payment itself happens on the client device.
pub struct RazorpayClient {
    http: reqwest::Client,
    base_url: String,
    key_id: String,
    key_secret: String,
}

#[derive(Debug, Deserialize)]
struct RazorpayOrderResponse {
    id: String,
    amount: i64,
    currency: String,
}

#[derive(Debug, Deserialize)]
struct RazorpayErrorEnvelope {
    error: RazorpayErrorDetails,
}

#[derive(Debug, Deserialize)]
struct RazorpayErrorDetails {
    code: Option<String>,
    description: Option<String>,
}

impl RazorpayClient {
    pub fn new(base_url: String, key_id: String, key_secret: String) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("reqwest client must build");

        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            key_id,
            key_secret,
        }
    }
}

#[async_trait]
impl PaymentGateway for RazorpayClient {
    async fn create_order(&self, amount_minor: i64, receipt: &str) -> Result<PaymentOrder> {
        let request_id = Uuid::new_v4();
        let response = self
            .http
            .post(format!("{}/v1/orders", self.base_url))
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&json!({
                "amount": amount_minor,
                "currency": ORDER_CURRENCY,
                "receipt": receipt,
                "payment_capture": 1,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let details = serde_json::from_str::<RazorpayErrorEnvelope>(&body)
                .map(|envelope| {
                    format!(
                        "code={:?} description={:?}",
                        envelope.error.code, envelope.error.description
                    )
                })
                .unwrap_or_else(|_| body.clone());
            error!(%request_id, %status, details, "razorpay: order creation failed");
            return Err(anyhow!("payment provider rejected order creation"));
        }

        let order = response.json::<RazorpayOrderResponse>().await?;
        Ok(PaymentOrder {
            order_id: order.id,
            amount_minor: order.amount,
            currency: order.currency,
        })
    }
}
