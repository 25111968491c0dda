//! Mock payment provider for testing.
//!
//! Provides a configurable mock implementation of `PaymentProvider` for
//! unit and integration tests. Supports:
//! - Pre-configured responses
//! - Error injection
//! - Call tracking

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::ports::{
    CheckoutSession, CreateCheckoutRequest, CreateCustomerRequest, CreatePaymentIntentRequest,
    CreateSubscriptionRequest, Customer, PaymentError, PaymentIntent, PaymentProvider,
    Subscription,
};

/// Mock payment provider for testing.
///
/// # Example
///
/// ```ignore
/// let mock = MockPaymentProvider::new();
/// mock.set_payment_intent(PaymentIntent { id: "pi_test".into(), ... });
///
/// let result = mock.create_payment_intent(request).await;
/// assert_eq!(mock.calls(), vec!["create_payment_intent"]);
/// ```
#[derive(Default)]
pub struct MockPaymentProvider {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Next payment intent to return (create and retrieve).
    next_payment_intent: Option<PaymentIntent>,

    /// Next customer to return.
    next_customer: Option<Customer>,

    /// Next subscription to return.
    next_subscription: Option<Subscription>,

    /// Next checkout session to return.
    next_checkout: Option<CheckoutSession>,

    /// Error to return on every call until cleared.
    next_error: Option<PaymentError>,

    /// Method names in invocation order.
    call_log: Vec<String>,
}

impl MockPaymentProvider {
    /// Create a new mock provider with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the payment intent returned by intent operations.
    pub fn set_payment_intent(&self, intent: PaymentIntent) {
        self.inner.lock().unwrap().next_payment_intent = Some(intent);
    }

    /// Set the customer returned by `create_customer`.
    pub fn set_customer(&self, customer: Customer) {
        self.inner.lock().unwrap().next_customer = Some(customer);
    }

    /// Set the subscription returned by `create_subscription`.
    pub fn set_subscription(&self, subscription: Subscription) {
        self.inner.lock().unwrap().next_subscription = Some(subscription);
    }

    /// Set the checkout session returned by `create_checkout_session`.
    pub fn set_checkout_session(&self, session: CheckoutSession) {
        self.inner.lock().unwrap().next_checkout = Some(session);
    }

    /// Inject an error returned by every call until cleared.
    pub fn set_error(&self, error: PaymentError) {
        self.inner.lock().unwrap().next_error = Some(error);
    }

    /// Get the names of methods called, in order.
    pub fn calls(&self) -> Vec<String> {
        self.inner.lock().unwrap().call_log.clone()
    }

    fn record(&self, method: &str) -> Result<(), PaymentError> {
        let mut state = self.inner.lock().unwrap();
        state.call_log.push(method.to_string());
        match &state.next_error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn create_payment_intent(
        &self,
        _request: CreatePaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentError> {
        self.record("create_payment_intent")?;
        Ok(self
            .inner
            .lock()
            .unwrap()
            .next_payment_intent
            .clone()
            .unwrap_or(PaymentIntent {
                id: "pi_mock".to_string(),
                client_secret: Some("pi_mock_secret".to_string()),
                status: "requires_payment_method".to_string(),
                payment_method: None,
            }))
    }

    async fn create_customer(
        &self,
        request: CreateCustomerRequest,
    ) -> Result<Customer, PaymentError> {
        self.record("create_customer")?;
        Ok(self
            .inner
            .lock()
            .unwrap()
            .next_customer
            .clone()
            .unwrap_or(Customer {
                id: "cus_mock".to_string(),
                email: Some(request.email),
            }))
    }

    async fn create_subscription(
        &self,
        _request: CreateSubscriptionRequest,
    ) -> Result<Subscription, PaymentError> {
        self.record("create_subscription")?;
        Ok(self
            .inner
            .lock()
            .unwrap()
            .next_subscription
            .clone()
            .unwrap_or(Subscription {
                id: "sub_mock".to_string(),
                customer_id: "cus_mock".to_string(),
                status: "active".to_string(),
                latest_invoice: None,
            }))
    }

    async fn create_checkout_session(
        &self,
        _request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        self.record("create_checkout_session")?;
        Ok(self
            .inner
            .lock()
            .unwrap()
            .next_checkout
            .clone()
            .unwrap_or(CheckoutSession {
                id: "cs_mock".to_string(),
                url: Some("https://checkout.stripe.com/c/pay/cs_mock".to_string()),
            }))
    }

    async fn retrieve_payment_intent(
        &self,
        payment_intent_id: &str,
    ) -> Result<PaymentIntent, PaymentError> {
        self.record("retrieve_payment_intent")?;
        Ok(self
            .inner
            .lock()
            .unwrap()
            .next_payment_intent
            .clone()
            .unwrap_or(PaymentIntent {
                id: payment_intent_id.to_string(),
                client_secret: None,
                status: "succeeded".to_string(),
                payment_method: Some("pm_mock".to_string()),
            }))
    }
}
