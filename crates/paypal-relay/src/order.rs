//! Wire types for the Orders API and the token endpoint.

use serde::{Deserialize, Serialize};

/// Amount carried by a purchase unit. PayPal expects major currency units as
/// a decimal string with no symbol, e.g. `"25.00"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderAmount {
    pub currency_code: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseUnit {
    pub amount: OrderAmount,
}

/// Body of `POST /v2/checkout/orders`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderBody {
    pub intent: String,
    pub purchase_units: Vec<PurchaseUnit>,
}

impl CreateOrderBody {
    /// A single-purchase-unit CAPTURE order in the given currency.
    pub fn capture(currency_code: &str, value: &str) -> Self {
        Self {
            intent: "CAPTURE".to_string(),
            purchase_units: vec![PurchaseUnit {
                amount: OrderAmount {
                    currency_code: currency_code.to_string(),
                    value: value.to_string(),
                },
            }],
        }
    }
}

/// Response of the client-credentials token exchange. Held for the duration
/// of a single relay operation and then dropped.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
    #[serde(default)]
    pub expires_in: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_body_shape() {
        let body = CreateOrderBody::capture("USD", "25.00");
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["intent"], "CAPTURE");
        assert_eq!(json["purchase_units"].as_array().unwrap().len(), 1);
        assert_eq!(json["purchase_units"][0]["amount"]["currency_code"], "USD");
        assert_eq!(json["purchase_units"][0]["amount"]["value"], "25.00");
    }

    #[test]
    fn test_access_token_tolerates_missing_expiry() {
        let token: AccessToken =
            serde_json::from_str(r#"{"access_token":"tok","token_type":"Bearer"}"#).unwrap();
        assert_eq!(token.access_token, "tok");
        assert_eq!(token.expires_in, 0);
    }
}
