//! Price Created V1 Contract Types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::subjects::PRICE_CREATED;

/// Payload published on `price.created`
///
/// Both identifiers are assigned by the producer when the event is built;
/// callers never supply them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceCreatedV1 {
    /// Internal product identifier, key of the consumer projection
    #[serde(rename = "stbx_product_id")]
    pub product_id: Uuid,

    /// Internal price identifier
    #[serde(rename = "stbx_price_id")]
    pub price_id: Uuid,

    pub name: String,

    /// Amount in minor units
    pub amount: i64,

    /// ISO 4217 currency code (e.g., "USD")
    pub currency: String,
}

impl PriceCreatedV1 {
    pub const EVENT_TYPE: &'static str = PRICE_CREATED;
    pub const VERSION: u32 = 1;

    /// Build a new event with freshly generated product and price ids
    pub fn new(name: String, amount: i64, currency: String) -> Self {
        Self {
            product_id: Uuid::new_v4(),
            price_id: Uuid::new_v4(),
            name,
            amount,
            currency,
        }
    }
}
