use async_trait::async_trait;
use event_consumer::{EventHandler, HandlerContext, HandlerError};
use platform_contracts::{HealthStatus, MonitoredComponent, PriceCreatedV1, StatusReportV1};

use crate::external_ids::ExternalIdIssuer;

/// Handle price.created v1
///
/// Issues a downstream product/price id pair and records it in the projection
/// under the event's product id. Not idempotent in value: a redelivered event
/// overwrites the entry with newly issued ids.
#[derive(Debug, Clone, Default)]
pub struct PriceCreatedHandler {
    issuer: ExternalIdIssuer,
}

impl PriceCreatedHandler {
    pub fn new(issuer: ExternalIdIssuer) -> Self {
        Self { issuer }
    }
}

#[async_trait]
impl EventHandler for PriceCreatedHandler {
    type Payload = PriceCreatedV1;

    async fn apply(
        &self,
        ctx: &HandlerContext<'_>,
        payload: PriceCreatedV1,
    ) -> Result<(), HandlerError> {
        tracing::info!(
            event_id = %ctx.envelope.id,
            product_id = %payload.product_id,
            price_id = %payload.price_id,
            name = %payload.name,
            amount = payload.amount,
            currency = %payload.currency,
            "Processing price created event"
        );

        let external = self.issuer.issue();
        ctx.store.put(payload.product_id, external.to_string())?;

        tracing::info!(
            product_id = %payload.product_id,
            external_product_id = %external.product_id,
            external_price_id = %external.price_id,
            "Stored external ids"
        );

        Ok(())
    }
}

/// Handle ping.<component>.status v1
///
/// Observes and logs the reported health; has no projection side effect.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusHandler;

#[async_trait]
impl EventHandler for StatusHandler {
    type Payload = StatusReportV1;

    async fn apply(
        &self,
        ctx: &HandlerContext<'_>,
        payload: StatusReportV1,
    ) -> Result<(), HandlerError> {
        let component = MonitoredComponent::from_subject(&ctx.envelope.event_type)
            .map(|c| c.as_str())
            .unwrap_or("unknown");

        match payload.status {
            HealthStatus::Healthy => tracing::info!(
                event_id = %ctx.envelope.id,
                component = component,
                status = %payload.status,
                "Ping status"
            ),
            HealthStatus::Down => tracing::warn!(
                event_id = %ctx.envelope.id,
                component = component,
                status = %payload.status,
                "Ping status"
            ),
        }

        Ok(())
    }
}
