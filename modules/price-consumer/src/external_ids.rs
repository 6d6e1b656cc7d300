//! Simulated downstream ID issuance
//!
//! Stands in for an external billing system that assigns its own product and
//! price identifiers. Every call issues new ids, so applying the same event
//! twice yields two different records.

use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Product and price ids as issued by the downstream system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalIdPair {
    pub product_id: String,
    pub price_id: String,
}

#[derive(Debug, thiserror::Error)]
#[error("invalid external id record: '{0}'")]
pub struct ParseExternalIdError(String);

/// Issues `prod_<uuid>` / `price_<uuid>` identifiers
#[derive(Debug, Clone, Copy, Default)]
pub struct ExternalIdIssuer;

impl ExternalIdIssuer {
    pub fn new() -> Self {
        Self
    }

    pub fn issue(&self) -> ExternalIdPair {
        ExternalIdPair {
            product_id: format!("prod_{}", Uuid::new_v4()),
            price_id: format!("price_{}", Uuid::new_v4()),
        }
    }
}

/// Stored form: `<product id>:<price id>`
impl fmt::Display for ExternalIdPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.product_id, self.price_id)
    }
}

impl FromStr for ExternalIdPair {
    type Err = ParseExternalIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((product_id, price_id))
                if product_id.starts_with("prod_") && price_id.starts_with("price_") =>
            {
                Ok(Self {
                    product_id: product_id.to_string(),
                    price_id: price_id.to_string(),
                })
            }
            _ => Err(ParseExternalIdError(s.to_string())),
        }
    }
}
