use platform_contracts::{HealthStatus, PriceCreatedV1};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Requests
// ============================================================================

/// Body of `POST /products`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceCreateRequest {
    pub name: String,
    /// Amount in minor units
    pub amount: i64,
    pub currency: String,
}

impl PriceCreateRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        if self.amount < 0 {
            return Err("amount must not be negative".to_string());
        }
        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err("currency must be a 3-letter ISO 4217 code".to_string());
        }
        Ok(())
    }

    /// Map the request onto the event contract, assigning fresh ids
    pub fn into_event(self) -> PriceCreatedV1 {
        PriceCreatedV1::new(self.name, self.amount, self.currency.to_ascii_uppercase())
    }
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PingResponse {
    pub status: HealthStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreatedResponse {
    pub status: String,
    pub event_id: Uuid,
    pub product_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, amount: i64, currency: &str) -> PriceCreateRequest {
        PriceCreateRequest {
            name: name.to_string(),
            amount,
            currency: currency.to_string(),
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request("Widget", 500, "USD").validate().is_ok());
        assert!(request("Freebie", 0, "eur").validate().is_ok());
    }

    #[test]
    fn test_invalid_requests() {
        assert!(request("  ", 500, "USD").validate().is_err());
        assert!(request("Widget", -1, "USD").validate().is_err());
        assert!(request("Widget", 500, "US").validate().is_err());
        assert!(request("Widget", 500, "U$D").validate().is_err());
    }

    #[test]
    fn test_into_event_normalizes_currency() {
        let event = request("Widget", 500, "usd").into_event();

        assert_eq!(event.name, "Widget");
        assert_eq!(event.amount, 500);
        assert_eq!(event.currency, "USD");
        assert_ne!(event.product_id, event.price_id);
    }
}
