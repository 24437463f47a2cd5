//! Razorpay integration via REST API (no SDK dependency)
//!
//! The client is constructed once at startup. Missing credentials disable the
//! payment feature rather than crashing the server; gated endpoints answer
//! 503 in that state.

use hmac::{Hmac, Mac};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use sha2::Sha256;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Clone)]
struct Credentials {
    key_id: String,
    key_secret: String,
}

/// Razorpay REST client
#[derive(Clone)]
pub struct RazorpayClient {
    http: reqwest::Client,
    creds: Option<Credentials>,
}

/// Provider order handle returned to the client for checkout
#[derive(Debug, serde::Serialize)]
pub struct PaymentOrder {
    pub order_id: String,
    /// Amount in the currency's smallest unit (paise)
    pub amount: i64,
    pub currency: String,
}

impl RazorpayClient {
    pub fn new(key_id: Option<String>, key_secret: Option<String>) -> Self {
        let creds = match (key_id, key_secret) {
            (Some(key_id), Some(key_secret)) => Some(Credentials { key_id, key_secret }),
            _ => {
                tracing::warn!("Razorpay not configured - payment features disabled");
                None
            }
        };
        Self {
            http: reqwest::Client::new(),
            creds,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.creds.is_some()
    }

    /// Public key id, exposed to the browser checkout widget
    pub fn key_id(&self) -> Option<&str> {
        self.creds.as_ref().map(|c| c.key_id.as_str())
    }

    /// Create a payment order for `amount` (major currency units)
    pub async fn create_order(
        &self,
        amount: Decimal,
        currency: &str,
        receipt: &str,
    ) -> Result<PaymentOrder, BoxError> {
        let creds = self.creds.as_ref().ok_or("Razorpay not configured")?;

        // Provider expects the smallest currency unit
        let paise = (amount * Decimal::from(100))
            .round()
            .to_i64()
            .ok_or("Order amount out of range")?;

        let resp: serde_json::Value = self
            .http
            .post("https://api.razorpay.com/v1/orders")
            .basic_auth(&creds.key_id, Some(&creds.key_secret))
            .json(&serde_json::json!({
                "amount": paise,
                "currency": currency,
                "receipt": receipt,
            }))
            .send()
            .await?
            .json()
            .await?;

        let order_id = resp["id"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| format!("Razorpay order creation failed: {resp}"))?;

        Ok(PaymentOrder {
            order_id,
            amount: resp["amount"].as_i64().unwrap_or(paise),
            currency: resp["currency"].as_str().unwrap_or(currency).to_string(),
        })
    }

    /// Verify a payment callback signature.
    ///
    /// The expected signature is HMAC-SHA256 over `"{order_id}|{payment_id}"`
    /// keyed by the key secret, hex-encoded. Comparison is constant-time via
    /// `Mac::verify_slice`. Returns `false` on any mismatch or when the client
    /// is disabled; never errors.
    pub fn verify_payment_signature(
        &self,
        order_id: &str,
        payment_id: &str,
        signature: &str,
    ) -> bool {
        let Some(creds) = &self.creds else {
            return false;
        };

        let payload = format!("{order_id}|{payment_id}");
        let Ok(mut mac) = Hmac::<Sha256>::new_from_slice(creds.key_secret.as_bytes()) else {
            return false;
        };
        mac.update(payload.as_bytes());

        let Ok(sig_bytes) = hex::decode(signature) else {
            return false;
        };
        mac.verify_slice(&sig_bytes).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(secret: &str) -> RazorpayClient {
        RazorpayClient::new(Some("rzp_test_key".into()), Some(secret.into()))
    }

    fn sign(secret: &str, order_id: &str, payment_id: &str) -> String {
        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(format!("{order_id}|{payment_id}").as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    #[test]
    fn test_valid_signature_accepted() {
        let c = client("topsecret");
        let sig = sign("topsecret", "order_abc", "pay_xyz");
        assert!(c.verify_payment_signature("order_abc", "pay_xyz", &sig));
    }

    #[test]
    fn test_mutated_order_id_rejected() {
        let c = client("topsecret");
        let sig = sign("topsecret", "order_abc", "pay_xyz");
        assert!(!c.verify_payment_signature("order_abd", "pay_xyz", &sig));
    }

    #[test]
    fn test_mutated_payment_id_rejected() {
        let c = client("topsecret");
        let sig = sign("topsecret", "order_abc", "pay_xyz");
        assert!(!c.verify_payment_signature("order_abc", "pay_xyZ", &sig));
    }

    #[test]
    fn test_mutated_signature_rejected() {
        let c = client("topsecret");
        let mut sig = sign("topsecret", "order_abc", "pay_xyz");
        // Flip one hex digit
        let last = sig.pop().unwrap();
        sig.push(if last == '0' { '1' } else { '0' });
        assert!(!c.verify_payment_signature("order_abc", "pay_xyz", &sig));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let c = client("topsecret");
        let sig = sign("othersecret", "order_abc", "pay_xyz");
        assert!(!c.verify_payment_signature("order_abc", "pay_xyz", &sig));
    }

    #[test]
    fn test_non_hex_signature_rejected() {
        let c = client("topsecret");
        assert!(!c.verify_payment_signature("order_abc", "pay_xyz", "not hex at all"));
    }

    #[test]
    fn test_disabled_client_rejects() {
        let c = RazorpayClient::new(None, None);
        assert!(!c.is_enabled());
        let sig = sign("topsecret", "order_abc", "pay_xyz");
        assert!(!c.verify_payment_signature("order_abc", "pay_xyz", &sig));
    }
}
