//! Checkout orchestrator: turns a cart into a saved order and a messaging
//! handoff.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use jiff::Timestamp;
use rand::{RngCore, rngs::OsRng};
use reqwest::Url;
use storefront::{
    cart::Cart,
    handoff::compose_order_message,
    orders::{CustomerDetails, Order, OrderError, OrderReference},
    store::StoreConfig,
};
use tracing::{error, info, warn};

use crate::{
    checkout::{CheckoutError, HandoffChannel, handoff_url},
    gateway::CatalogGateway,
};

/// Outcome of a completed checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutReceipt {
    pub reference: OrderReference,
    pub total: u64,
    pub handoff_url: Url,
}

pub struct CheckoutService {
    gateway: Arc<dyn CatalogGateway>,
    handoff: Arc<dyn HandoffChannel>,
    in_flight: AtomicBool,
}

impl std::fmt::Debug for CheckoutService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutService")
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}

/// Clears the in-flight flag when the checkout ends, however it ends.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl CheckoutService {
    #[must_use]
    pub fn new(gateway: Arc<dyn CatalogGateway>, handoff: Arc<dyn HandoffChannel>) -> Self {
        Self {
            gateway,
            handoff,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Whether a checkout is currently running.
    #[must_use]
    pub fn in_progress(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Place the order held in `cart` and hand it off to the store.
    ///
    /// The order is saved before the handoff starts, and the cart is only
    /// cleared once the handoff succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InProgress`] while another checkout runs,
    /// [`CheckoutError::EmptyCart`] or [`CheckoutError::ValidationFailed`]
    /// before touching the gateway, [`CheckoutError::OrderPersistFailed`]
    /// when the order cannot be saved, and [`CheckoutError::HandoffFailed`]
    /// when the saved order cannot be handed off.
    pub async fn checkout(
        &self,
        cart: &mut Cart,
        customer: CustomerDetails,
        config: &StoreConfig,
    ) -> Result<CheckoutReceipt, CheckoutError> {
        let _in_flight = InFlight::acquire(&self.in_flight).ok_or(CheckoutError::InProgress)?;

        config.validate()?;

        let created_at = Timestamp::now();
        let reference = OrderReference::generate(created_at, OsRng.next_u32());

        let order =
            Order::from_cart(reference, created_at, customer, cart).map_err(|error| match error {
                OrderError::EmptyCart => CheckoutError::EmptyCart,
                OrderError::MissingField(field) => CheckoutError::ValidationFailed(field),
            })?;

        self.gateway.save_order(&order).await.map_err(|source| {
            error!(order_reference = %order.reference, "failed to save order: {source}");

            CheckoutError::OrderPersistFailed(source)
        })?;

        let message = compose_order_message(&config.store_name, &order);

        let handoff = match handoff_url(&config.whatsapp_number, &message) {
            Ok(url) => self.handoff.initiate(&url).await.map(|()| url),
            Err(source) => Err(source),
        };

        let handoff_url = handoff.map_err(|source| {
            warn!(order_reference = %order.reference, "order saved but handoff failed: {source}");

            CheckoutError::HandoffFailed {
                reference: order.reference.clone(),
                source,
            }
        })?;

        cart.clear();

        info!(order_reference = %order.reference, total = order.total, "checkout completed");

        Ok(CheckoutReceipt {
            reference: order.reference,
            total: order.total,
            handoff_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use storefront::{
        orders::CustomerField,
        products::{Product, ProductId},
    };
    use testresult::TestResult;

    use crate::{
        checkout::{HandoffError, MockHandoffChannel},
        gateway::{GatewayError, service::MockCatalogGateway},
    };

    use super::*;

    fn tenis() -> Product {
        Product {
            id: ProductId::new(1),
            name: "Tênis".to_string(),
            price: 12_000,
            category: "Calçados".to_string(),
            description: String::new(),
            image: String::new(),
            is_new: false,
            sold_out: false,
        }
    }

    fn customer() -> CustomerDetails {
        CustomerDetails {
            name: "Ana".to_string(),
            phone: "923000000".to_string(),
            address: "Rua 1, Luanda".to_string(),
        }
    }

    fn cart_with_two_tenis() -> Cart {
        let mut cart = Cart::new();

        cart.add(&tenis());
        cart.add(&tenis());

        cart
    }

    fn service(gateway: MockCatalogGateway, handoff: MockHandoffChannel) -> CheckoutService {
        CheckoutService::new(Arc::new(gateway), Arc::new(handoff))
    }

    #[tokio::test]
    async fn successful_checkout_saves_hands_off_and_clears_cart() -> TestResult {
        let mut gateway = MockCatalogGateway::new();
        let mut handoff = MockHandoffChannel::new();

        gateway
            .expect_save_order()
            .withf(|order| order.total == 24_000 && order.items.len() == 1)
            .once()
            .returning(|_| Ok(()));

        handoff
            .expect_initiate()
            .withf(|url| {
                let text: String = url
                    .query_pairs()
                    .filter(|(key, _)| key == "text")
                    .map(|(_, value)| value.into_owned())
                    .collect();

                url.path() == "/244932853435"
                    && text.contains("• 2x Tênis - 24 000 Kz")
                    && text.contains("*Total: 24 000 Kz*")
            })
            .once()
            .returning(|_| Ok(()));

        let service = service(gateway, handoff);
        let mut cart = cart_with_two_tenis();

        let receipt = service
            .checkout(&mut cart, customer(), &StoreConfig::default())
            .await?;

        assert_eq!(receipt.total, 24_000);
        assert!(receipt.reference.as_str().starts_with("MK-"));
        assert!(cart.is_empty());
        assert!(!service.in_progress());

        Ok(())
    }

    #[tokio::test]
    async fn blank_customer_field_is_rejected_before_saving() {
        let mut gateway = MockCatalogGateway::new();
        let mut handoff = MockHandoffChannel::new();

        gateway.expect_save_order().never();
        handoff.expect_initiate().never();

        let service = service(gateway, handoff);
        let mut cart = cart_with_two_tenis();

        let result = service
            .checkout(
                &mut cart,
                CustomerDetails {
                    phone: " ".to_string(),
                    ..customer()
                },
                &StoreConfig::default(),
            )
            .await;

        assert!(
            matches!(result, Err(CheckoutError::ValidationFailed(CustomerField::Phone))),
            "expected ValidationFailed(phone), got {result:?}"
        );
        assert_eq!(cart.count(), 2);
    }

    #[tokio::test]
    async fn empty_cart_is_rejected_before_saving() {
        let mut gateway = MockCatalogGateway::new();

        gateway.expect_save_order().never();

        let service = service(gateway, MockHandoffChannel::new());

        let result = service
            .checkout(&mut Cart::new(), customer(), &StoreConfig::default())
            .await;

        assert!(
            matches!(result, Err(CheckoutError::EmptyCart)),
            "expected EmptyCart, got {result:?}"
        );
    }

    #[tokio::test]
    async fn persist_failure_keeps_cart_and_skips_handoff() {
        let mut gateway = MockCatalogGateway::new();
        let mut handoff = MockHandoffChannel::new();

        gateway
            .expect_save_order()
            .once()
            .returning(|_| Err(GatewayError::Timeout));
        handoff.expect_initiate().never();

        let service = service(gateway, handoff);
        let mut cart = cart_with_two_tenis();

        let result = service
            .checkout(&mut cart, customer(), &StoreConfig::default())
            .await;

        assert!(
            matches!(result, Err(CheckoutError::OrderPersistFailed(GatewayError::Timeout))),
            "expected OrderPersistFailed, got {result:?}"
        );
        assert_eq!(cart.total(), 24_000);
        assert!(!service.in_progress());
    }

    #[tokio::test]
    async fn handoff_failure_reports_saved_reference_and_keeps_cart() {
        let mut gateway = MockCatalogGateway::new();
        let mut handoff = MockHandoffChannel::new();

        gateway.expect_save_order().once().returning(|_| Ok(()));
        handoff
            .expect_initiate()
            .once()
            .returning(|_| Err(HandoffError::Unavailable("no browser".to_string())));

        let service = service(gateway, handoff);
        let mut cart = cart_with_two_tenis();

        let result = service
            .checkout(&mut cart, customer(), &StoreConfig::default())
            .await;

        assert!(
            matches!(
                &result,
                Err(CheckoutError::HandoffFailed { reference, .. })
                    if reference.as_str().starts_with("MK-")
            ),
            "expected HandoffFailed, got {result:?}"
        );
        assert_eq!(cart.count(), 2);
    }

    #[tokio::test]
    async fn second_checkout_while_in_flight_is_rejected() {
        let service = service(MockCatalogGateway::new(), MockHandoffChannel::new());

        let _held = InFlight::acquire(&service.in_flight);

        let result = service
            .checkout(&mut cart_with_two_tenis(), customer(), &StoreConfig::default())
            .await;

        assert!(
            matches!(result, Err(CheckoutError::InProgress)),
            "expected InProgress, got {result:?}"
        );
    }

    #[tokio::test]
    async fn invalid_store_contact_is_rejected_before_saving() {
        let mut gateway = MockCatalogGateway::new();

        gateway.expect_save_order().never();

        let service = service(gateway, MockHandoffChannel::new());

        let config = StoreConfig {
            whatsapp_number: String::new(),
            ..StoreConfig::default()
        };

        let result = service
            .checkout(&mut cart_with_two_tenis(), customer(), &config)
            .await;

        assert!(
            matches!(result, Err(CheckoutError::InvalidContact(_))),
            "expected InvalidContact, got {result:?}"
        );
    }
}
