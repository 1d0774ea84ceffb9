//! Order submission flow
//!
//! Validates the checkout form, packages the cart into the creation
//! payload, submits it, and reports where the customer goes next. Any
//! failure before or during submission leaves the cart untouched so the
//! customer can retry.

use crate::{CartStore, ClientError, ClientResult, HttpClient};
use chrono::{DateTime, Utc};
use shared::models::{CustomerInfo, Order, OrderCreate, OrderItemInput, PaymentMethod, PickupKind};

/// When the customer picks the order up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickupOption {
    /// Pick up as soon as it is ready
    #[default]
    Now,
    /// Scheduled pickup; the time is required by construction
    Later { time: DateTime<Utc> },
}

/// Customer-supplied checkout fields
#[derive(Debug, Clone)]
pub struct CheckoutForm {
    pub name: String,
    pub phone: String,
    pub payment_method: PaymentMethod,
    pub notes: String,
    pub pickup: PickupOption,
}

impl CheckoutForm {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            payment_method: PaymentMethod::Pix,
            notes: String::new(),
            pickup: PickupOption::Now,
        }
    }

    pub fn with_payment_method(mut self, method: PaymentMethod) -> Self {
        self.payment_method = method;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_pickup(mut self, pickup: PickupOption) -> Self {
        self.pickup = pickup;
        self
    }

    /// Precondition check, run before any network call
    fn validate(&self, cart: &CartStore) -> ClientResult<()> {
        if self.name.trim().is_empty() || self.phone.trim().is_empty() {
            return Err(ClientError::Validation(
                "customer name and phone are required".to_string(),
            ));
        }
        if cart.is_empty() {
            return Err(ClientError::Validation("cart is empty".to_string()));
        }
        Ok(())
    }

    /// Build the creation payload: product id + quantity per line, no
    /// prices (the server is the pricing authority at order time)
    fn to_payload(&self, cart: &CartStore) -> OrderCreate {
        let (pickup_kind, pickup_time) = match self.pickup {
            PickupOption::Now => (PickupKind::Now, None),
            PickupOption::Later { time } => (PickupKind::Later, Some(time)),
        };

        OrderCreate {
            customer: CustomerInfo {
                name: self.name.trim().to_string(),
                phone: self.phone.trim().to_string(),
            },
            items: cart
                .items()
                .iter()
                .map(|item| OrderItemInput {
                    product: item.product.id.clone(),
                    quantity: item.quantity,
                })
                .collect(),
            payment_method: self.payment_method,
            notes: if self.notes.trim().is_empty() {
                None
            } else {
                Some(self.notes.trim().to_string())
            },
            pickup_kind,
            pickup_time,
        }
    }
}

/// Where the customer is routed after a successful submission
#[derive(Debug, Clone)]
pub enum CheckoutOutcome {
    /// PIX order: payment-confirmation view, keyed by the order id
    PixConfirmation { order: Order },
    /// Other payment methods: status tracking, keyed by the order number
    Tracking { order: Order },
}

impl CheckoutOutcome {
    pub fn order(&self) -> &Order {
        match self {
            CheckoutOutcome::PixConfirmation { order } => order,
            CheckoutOutcome::Tracking { order } => order,
        }
    }
}

/// Submit the cart as an order
///
/// On success the cart is cleared unconditionally; a snapshot-write
/// failure at that point is only logged, since the order already exists
/// server-side. On any submission failure the cart is left intact.
pub async fn submit_order(
    client: &HttpClient,
    cart: &mut CartStore,
    form: &CheckoutForm,
) -> ClientResult<CheckoutOutcome> {
    form.validate(cart)?;

    let payload = form.to_payload(cart);
    let order = client.create_order(&payload).await?;

    if let Err(e) = cart.clear() {
        tracing::warn!(error = %e, order = %order.number, "Order created but cart snapshot not cleared");
    }

    tracing::info!(order = %order.number, total = order.total, "Order created");

    if order.payment_method.is_pix() {
        Ok(CheckoutOutcome::PixConfirmation { order })
    } else {
        Ok(CheckoutOutcome::Tracking { order })
    }
}
