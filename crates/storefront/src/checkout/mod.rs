//! Simulated checkout flow.
//!
//! A strictly linear machine the purchase modal drives: shipping details,
//! then payment method, then a fixed "processing" pause, then a synthetic
//! confirmation. Nothing is charged, reserved, or shipped; stock is never
//! decremented. The one nod to realism is that processing is uncancellable
//! once it starts, exactly like the spinner it stands in for.
//!
//! Validation is presence-only by design. The forms check that fields were
//! filled, not that the email is deliverable or the card number passes Luhn;
//! a demo that rejected test data would be useless.

mod format;

pub use format::{format_card_number, format_expiry_date};

use std::time::Duration;

use thiserror::Error;
use tracing::{info, instrument};

use cartwheel_core::{OrderId, Price};

use crate::clock::Clock;

/// Fixed simulated payment-processing pause.
pub const PROCESSING_DELAY: Duration = Duration::from_millis(2500);

/// Static delivery estimate shown on the confirmation screen.
pub const DELIVERY_ESTIMATE: &str = "5-7 business days";

/// Steps of the checkout flow, in order.
///
/// Transitions only ever move forward one step at a time; closing the modal
/// resets to [`Details`](Self::Details).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStep {
    /// Collecting the shipping form.
    Details,
    /// Choosing how to pay.
    Payment,
    /// The simulated processing pause. No user-facing controls exist here.
    Processing,
    /// Confirmation is showing.
    Success,
}

impl std::fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Details => "details",
            Self::Payment => "payment",
            Self::Processing => "processing",
            Self::Success => "success",
        };
        write!(f, "{label}")
    }
}

/// How the customer pays. Only card collects further input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentMethod {
    /// Credit or debit card; requires the card form.
    #[default]
    Card,
    /// UPI handoff; no further input in this demo.
    Upi,
    /// Wallet handoff; no further input in this demo.
    Wallet,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Card => "Credit / Debit Card",
            Self::Upi => "UPI",
            Self::Wallet => "Wallet",
        };
        write!(f, "{label}")
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "card" => Ok(Self::Card),
            "upi" => Ok(Self::Upi),
            "wallet" => Ok(Self::Wallet),
            _ => Err(format!(
                "invalid payment method '{s}' (expected card, upi, or wallet)"
            )),
        }
    }
}

/// Shipping fields collected at the details step.
///
/// All six must be non-blank to advance; beyond that, anything goes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShippingForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub zip_code: String,
}

impl ShippingForm {
    /// Names of blank fields, in form order. Whitespace-only counts as
    /// blank; a field of spaces reads as skipped, not filled.
    fn missing_fields(&self) -> Vec<&'static str> {
        let fields = [
            ("full name", &self.full_name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("address", &self.address),
            ("city", &self.city),
            ("zip code", &self.zip_code),
        ];
        fields
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name)
            .collect()
    }
}

/// Card fields, required only when paying by card.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardForm {
    pub card_number: String,
    pub expiry_date: String,
    pub cvv: String,
    pub card_name: String,
}

impl CardForm {
    fn missing_fields(&self) -> Vec<&'static str> {
        let fields = [
            ("card number", &self.card_number),
            ("expiry date", &self.expiry_date),
            ("cvv", &self.cvv),
            ("name on card", &self.card_name),
        ];
        fields
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name)
            .collect()
    }
}

/// Errors from driving the checkout flow.
///
/// All of these are synchronous rejections of caller input; the machine
/// itself never fails.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// The operation does not belong to the current step.
    #[error("checkout is at the {current} step, expected {expected}")]
    WrongStep {
        current: CheckoutStep,
        expected: CheckoutStep,
    },

    /// Required fields are blank.
    #[error("missing required fields: {}", .fields.join(", "))]
    MissingFields { fields: Vec<&'static str> },

    /// Quantity must be at least one.
    #[error("quantity must be at least 1")]
    InvalidQuantity,
}

/// Confirmation produced when processing completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderConfirmation {
    /// Synthetic order ID minted at confirmation time.
    pub order_id: OrderId,
    /// Total charged in the simulation: unit price times quantity.
    pub total: Price,
    /// Static delivery estimate.
    pub delivery_estimate: &'static str,
}

/// One walk through the purchase flow for one product.
///
/// Construct a session when the purchase modal opens, drive it with the
/// methods below, and [`reset`](Self::reset) when the modal closes or the
/// customer taps through the confirmation. The session holds no clock; the
/// single timed step borrows one, so everything else stays synchronous.
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    unit_price: Price,
    step: CheckoutStep,
    quantity: u32,
    payment_method: PaymentMethod,
    shipping: ShippingForm,
    card: CardForm,
    order_id: Option<OrderId>,
}

impl CheckoutSession {
    /// Open the flow for a product at its effective (already discounted)
    /// unit price.
    #[must_use]
    pub fn new(unit_price: Price) -> Self {
        Self {
            unit_price,
            step: CheckoutStep::Details,
            quantity: 1,
            payment_method: PaymentMethod::default(),
            shipping: ShippingForm::default(),
            card: CardForm::default(),
            order_id: None,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Current step.
    #[must_use]
    pub const fn step(&self) -> CheckoutStep {
        self.step
    }

    /// Selected quantity.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Selected payment method.
    #[must_use]
    pub const fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    /// Unit price this session was opened with.
    #[must_use]
    pub const fn unit_price(&self) -> Price {
        self.unit_price
    }

    /// Total for the current quantity.
    #[must_use]
    pub fn total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }

    /// The shipping form.
    #[must_use]
    pub const fn shipping(&self) -> &ShippingForm {
        &self.shipping
    }

    /// Mutable access to the shipping form; the details screen binds its
    /// inputs here.
    pub const fn shipping_mut(&mut self) -> &mut ShippingForm {
        &mut self.shipping
    }

    /// The card form.
    #[must_use]
    pub const fn card(&self) -> &CardForm {
        &self.card
    }

    /// Mutable access to the card form for the fields that take raw input
    /// (cvv, name on card).
    pub const fn card_mut(&mut self) -> &mut CardForm {
        &mut self.card
    }

    /// Order ID, present once the flow reached [`CheckoutStep::Success`].
    #[must_use]
    pub const fn order_id(&self) -> Option<&OrderId> {
        self.order_id.as_ref()
    }

    // =========================================================================
    // Quantity and Payment Input
    // =========================================================================

    /// Set the quantity directly.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::InvalidQuantity` for zero.
    pub fn set_quantity(&mut self, quantity: u32) -> Result<(), CheckoutError> {
        if quantity == 0 {
            return Err(CheckoutError::InvalidQuantity);
        }
        self.quantity = quantity;
        Ok(())
    }

    /// Stepper "+": bump the quantity.
    pub const fn increment_quantity(&mut self) {
        self.quantity = self.quantity.saturating_add(1);
    }

    /// Stepper "-": drop the quantity, flooring at one. The control simply
    /// stops responding at the floor instead of erroring.
    pub fn decrement_quantity(&mut self) {
        self.quantity = self.quantity.saturating_sub(1).max(1);
    }

    /// Choose how to pay.
    pub const fn set_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = method;
    }

    /// Card-number keystroke: stores the display-formatted value.
    pub fn enter_card_number(&mut self, raw: &str) {
        self.card.card_number = format_card_number(raw);
    }

    /// Expiry keystroke: stores the display-formatted value.
    pub fn enter_expiry_date(&mut self, raw: &str) {
        self.card.expiry_date = format_expiry_date(raw);
    }

    // =========================================================================
    // Step Transitions
    // =========================================================================

    /// Validate the shipping form and advance to the payment step.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::WrongStep` outside the details step and
    /// `CheckoutError::MissingFields` naming every blank field; the step
    /// does not change on failure.
    pub fn submit_details(&mut self) -> Result<(), CheckoutError> {
        self.expect_step(CheckoutStep::Details)?;
        let missing = self.shipping.missing_fields();
        if !missing.is_empty() {
            return Err(CheckoutError::MissingFields { fields: missing });
        }
        self.step = CheckoutStep::Payment;
        Ok(())
    }

    /// Validate the payment selection and advance to processing.
    ///
    /// Card requires the full card form; UPI and wallet stand in for
    /// external apps and collect nothing here.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::WrongStep` outside the payment step and
    /// `CheckoutError::MissingFields` when paying by card with blank card
    /// fields.
    pub fn submit_payment(&mut self) -> Result<(), CheckoutError> {
        self.expect_step(CheckoutStep::Payment)?;
        if self.payment_method == PaymentMethod::Card {
            let missing = self.card.missing_fields();
            if !missing.is_empty() {
                return Err(CheckoutError::MissingFields { fields: missing });
            }
        }
        self.step = CheckoutStep::Processing;
        Ok(())
    }

    /// Run the processing pause and land on success with a confirmation.
    ///
    /// The order ID is minted from the clock *after* the pause, so it
    /// reflects the confirmation instant. Nothing can cancel this step.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::WrongStep` unless the flow is at
    /// [`CheckoutStep::Processing`].
    #[instrument(skip(self, clock))]
    pub async fn process(&mut self, clock: &dyn Clock) -> Result<OrderConfirmation, CheckoutError> {
        self.expect_step(CheckoutStep::Processing)?;
        clock.sleep(PROCESSING_DELAY).await;

        let order_id = OrderId::from_timestamp_millis(clock.now_utc().timestamp_millis());
        self.order_id = Some(order_id.clone());
        self.step = CheckoutStep::Success;

        let confirmation = OrderConfirmation {
            order_id,
            total: self.total(),
            delivery_estimate: DELIVERY_ESTIMATE,
        };
        info!(
            order_id = %confirmation.order_id,
            total = %confirmation.total,
            method = %self.payment_method,
            "order confirmed"
        );
        Ok(confirmation)
    }

    /// Back to a pristine session: details step, quantity one, card payment,
    /// blank forms, no order ID.
    ///
    /// This is both the "continue shopping" action on the confirmation and
    /// the effect of closing the modal from any earlier step.
    pub fn reset(&mut self) {
        *self = Self::new(self.unit_price);
    }

    fn expect_step(&self, expected: CheckoutStep) -> Result<(), CheckoutError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(CheckoutError::WrongStep {
                current: self.step,
                expected,
            })
        }
    }
}
