use event_bus::{BusResult, EventBus};
use event_consumer::{start_subscription, DedupPolicy, Dispatcher, ProjectionStore};
use platform_contracts::{
    MonitoredComponent, PriceCreatedV1, StatusReportV1, PRICE_CREATED, STATUS_FAMILY,
};
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::external_ids::ExternalIdIssuer;
use crate::handlers::{PriceCreatedHandler, StatusHandler};

/// Build the dispatch table for every event this service consumes
pub fn build_dispatcher(store: Arc<dyn ProjectionStore>, dedup: DedupPolicy) -> Dispatcher {
    let mut dispatcher = Dispatcher::new(store).with_dedup(dedup).register(
        PriceCreatedV1::EVENT_TYPE,
        PriceCreatedV1::VERSION,
        PriceCreatedHandler::new(ExternalIdIssuer::new()),
    );

    for component in MonitoredComponent::ALL {
        dispatcher = dispatcher.register(
            component.subject(),
            StatusReportV1::VERSION,
            StatusHandler,
        );
    }

    dispatcher
}

/// Start one subscription task for the status family and one for price creation
///
/// Returns an error if either subscribe call fails; tasks already started are
/// aborted in that case.
pub async fn start_consumers(
    bus: Arc<dyn EventBus>,
    dispatcher: Arc<Dispatcher>,
) -> BusResult<Vec<JoinHandle<()>>> {
    let mut handles = Vec::new();

    for pattern in [STATUS_FAMILY.pattern(), PRICE_CREATED] {
        match start_subscription(bus.clone(), pattern, dispatcher.clone()).await {
            Ok(handle) => handles.push(handle),
            Err(e) => {
                tracing::error!(pattern = pattern, error = %e, "Failed to subscribe");
                for handle in &handles {
                    handle.abort();
                }
                return Err(e);
            }
        }
    }

    Ok(handles)
}
