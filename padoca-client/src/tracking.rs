//! Order status tracking
//!
//! Polls a single order by number on a fixed interval and publishes the
//! latest state on a watch channel, so a status change between ticks is
//! observable without re-fetching by hand. The poll task's lifetime is
//! tied to the tracker handle: dropping or stopping it cancels the
//! timer, leaving no orphaned tasks behind after navigation.

use crate::{ClientError, ClientResult, HttpClient};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::interval;
use tokio_util::sync::CancellationToken;

/// Default refresh interval for tracking views
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Latest tracking snapshot
///
/// `order` holds the last successfully fetched state; a fetch error
/// after that keeps the stale order and records the error instead of
/// blanking the display.
#[derive(Debug, Clone, Default)]
pub struct TrackingState {
    pub order: Option<shared::models::Order>,
    pub last_error: Option<String>,
}

impl TrackingState {
    /// The order was never found (one-shot "order not found" display)
    pub fn not_found(&self) -> bool {
        self.order.is_none() && self.last_error.is_some()
    }
}

/// Polling tracker for a single order
pub struct OrderTracker {
    client: HttpClient,
    order_number: String,
    state: Arc<watch::Sender<TrackingState>>,
    cancel: CancellationToken,
}

impl OrderTracker {
    /// Spawn the poll task: one immediate fetch, then one per interval
    pub fn spawn(
        client: HttpClient,
        order_number: impl Into<String>,
        poll_interval: Duration,
    ) -> Self {
        let order_number = order_number.into();
        let state = Arc::new(watch::channel(TrackingState::default()).0);
        let cancel = CancellationToken::new();

        tokio::spawn(poll_loop(
            client.clone(),
            order_number.clone(),
            poll_interval,
            Arc::clone(&state),
            cancel.clone(),
        ));

        Self {
            client,
            order_number,
            state,
            cancel,
        }
    }

    /// The order number this tracker follows
    pub fn order_number(&self) -> &str {
        &self.order_number
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> watch::Receiver<TrackingState> {
        self.state.subscribe()
    }

    /// Current snapshot
    pub fn state(&self) -> TrackingState {
        self.state.borrow().clone()
    }

    /// Fetch now and publish, independent of the timer
    pub async fn refresh(&self) -> ClientResult<()> {
        let order = self.client.fetch_order_by_number(&self.order_number).await?;
        self.state.send_modify(|s| {
            s.order = Some(order);
            s.last_error = None;
        });
        Ok(())
    }

    /// Report customer-side PIX payment completion
    ///
    /// Returns `Ok(false)` without issuing a request when the latest
    /// snapshot already has the customer confirmation flag set; the
    /// server guards against duplicates, but the client never knowingly
    /// sends one. On success the snapshot is refreshed immediately.
    pub async fn confirm_pix(&self) -> ClientResult<bool> {
        let (order_id, already_confirmed) = {
            let state = self.state.borrow();
            match &state.order {
                Some(order) => (order.id.clone(), order.pix_confirmed_by_customer),
                None => {
                    return Err(ClientError::Validation(
                        "order not loaded yet".to_string(),
                    ));
                }
            }
        };

        if already_confirmed {
            return Ok(false);
        }

        match self.client.confirm_pix_payment(&order_id).await? {
            Some(order) => self.state.send_modify(|s| {
                s.order = Some(order);
                s.last_error = None;
            }),
            // Body-less confirmation: re-fetch to observe the flipped flag
            None => self.refresh().await?,
        }

        Ok(true)
    }

    /// Stop polling
    pub fn stop(&self) {
        self.cancel.cancel();
    }
}

impl Drop for OrderTracker {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn poll_loop(
    client: HttpClient,
    order_number: String,
    poll_interval: Duration,
    state: Arc<watch::Sender<TrackingState>>,
    cancel: CancellationToken,
) {
    tracing::debug!(order = %order_number, "Order tracker started");
    let mut ticker = interval(poll_interval);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        match client.fetch_order_by_number(&order_number).await {
            Ok(order) => {
                state.send_modify(|s| {
                    s.order = Some(order);
                    s.last_error = None;
                });
            }
            Err(e) => {
                tracing::warn!(order = %order_number, error = %e, "Order refresh failed");
                state.send_modify(|s| {
                    s.last_error = Some(e.to_string());
                });
            }
        }
    }

    tracing::debug!(order = %order_number, "Order tracker stopped");
}
