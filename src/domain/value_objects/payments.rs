use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Order object returned by the payment provider before the client pays.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentOrder {
    pub order_id: String,
    pub amount_minor: i64,
    pub currency: String,
}

/// Checks the provider callback signature: hex-encoded HMAC-SHA256 over
/// `orderId|paymentId`. `verify_slice` compares in constant time.
pub fn verify_payment_signature(
    order_id: &str,
    payment_id: &str,
    signature_hex: &str,
    key_secret: &str,
) -> bool {
    let Ok(expected) = hex::decode(signature_hex) else {
        return false;
    };

    let Ok(mut mac) = HmacSha256::new_from_slice(key_secret.as_bytes()) else {
        return false;
    };
    mac.update(format!("{}|{}", order_id, payment_id).as_bytes());
    mac.verify_slice(&expected).is_ok()
}
