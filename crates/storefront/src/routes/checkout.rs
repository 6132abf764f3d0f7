//! Checkout: collect customer details and hand the order off to WhatsApp.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use locura_core::{
    CartState, CheckoutDetails, CustomerName, Delivery, DeliveryKind, PaymentMethod,
    compose_order_message,
};

use crate::error::add_breadcrumb;
use crate::filters;
use crate::middleware::{CspNonce, SessionCart};
use crate::state::AppState;

/// Checkout form data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub payment: PaymentMethod,
    #[serde(default)]
    pub delivery: DeliveryKind,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub notes: String,
}

impl CheckoutForm {
    /// Turn the submitted fields into checkout details, or list what is missing.
    ///
    /// # Errors
    ///
    /// Returns one message per missing field.
    pub fn validate(&self) -> Result<CheckoutDetails, Vec<&'static str>> {
        let mut errors = Vec::new();
        if self.first_name.trim().is_empty() {
            errors.push("Ingresá tu nombre.");
        }
        if self.last_name.trim().is_empty() {
            errors.push("Ingresá tu apellido.");
        }

        let delivery = match self.delivery {
            DeliveryKind::Pickup => Delivery::Pickup,
            DeliveryKind::HomeDelivery => {
                if self.address.trim().is_empty() {
                    errors.push("Ingresá la dirección de entrega.");
                }
                Delivery::HomeDelivery {
                    address: self.address.trim().to_string(),
                }
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        let notes = Some(self.notes.trim())
            .filter(|notes| !notes.is_empty())
            .map(str::to_string);

        Ok(CheckoutDetails {
            customer: CustomerName::new(self.first_name.trim(), self.last_name.trim()),
            payment: self.payment,
            delivery,
            notes,
        })
    }
}

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub cart: CartState,
    pub form: CheckoutForm,
    pub errors: Vec<&'static str>,
    pub payment_methods: [PaymentMethod; 2],
    pub delivery_kinds: [DeliveryKind; 2],
    pub nonce: String,
}

impl CheckoutTemplate {
    fn new(cart: CartState, form: CheckoutForm, errors: Vec<&'static str>, nonce: String) -> Self {
        Self {
            cart,
            form,
            errors,
            payment_methods: PaymentMethod::all(),
            delivery_kinds: DeliveryKind::all(),
            nonce,
        }
    }
}

/// Display the checkout form. An empty cart goes back to the cart page.
#[instrument(skip(cart, nonce))]
pub async fn show(cart: SessionCart, CspNonce(nonce): CspNonce) -> Response {
    let cart = cart.into_state();
    if cart.is_empty() {
        return Redirect::to("/cart").into_response();
    }

    CheckoutTemplate::new(cart, CheckoutForm::default(), Vec::new(), nonce).into_response()
}

/// Compose the order message and redirect to WhatsApp.
///
/// Invalid forms are re-rendered with `422 Unprocessable Entity`. The cart is
/// kept: sending the message does not confirm the order.
#[instrument(skip(state, cart, nonce))]
pub async fn submit(
    State(state): State<AppState>,
    cart: SessionCart,
    CspNonce(nonce): CspNonce,
    Form(form): Form<CheckoutForm>,
) -> Response {
    let cart = cart.into_state();
    if cart.is_empty() {
        return Redirect::to("/cart").into_response();
    }

    match form.validate() {
        Ok(details) => {
            let message = compose_order_message(&cart, &details);
            let item_count = cart.item_count().to_string();
            add_breadcrumb(
                "checkout",
                "Order sent to WhatsApp",
                Some(&[("item_count", item_count.as_str())]),
            );
            tracing::info!(
                lines = cart.line_count(),
                payment = details.payment.value(),
                delivery = details.delivery.kind().value(),
                "Checkout handed off to WhatsApp"
            );
            Redirect::to(&state.whatsapp_link(&message))
                .into_response()
        }
        Err(errors) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            CheckoutTemplate::new(cart, form, errors, nonce),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> CheckoutForm {
        CheckoutForm {
            first_name: " Lucía ".to_string(),
            last_name: "Gómez".to_string(),
            payment: PaymentMethod::MercadoPago,
            ..CheckoutForm::default()
        }
    }

    #[test]
    fn test_valid_pickup_form() {
        let details = form().validate().unwrap_or_else(|e| panic!("{e:?}"));
        assert_eq!(details.customer.full(), "Lucía Gómez");
        assert_eq!(details.delivery, Delivery::Pickup);
        assert_eq!(details.notes, None);
    }

    #[test]
    fn test_home_delivery_requires_address() {
        let mut form = form();
        form.delivery = DeliveryKind::HomeDelivery;
        assert_eq!(
            form.validate().err(),
            Some(vec!["Ingresá la dirección de entrega."])
        );

        form.address = "Av. Belgrano 123".to_string();
        form.notes = "Timbre 2".to_string();
        let details = form.validate().unwrap_or_else(|e| panic!("{e:?}"));
        assert_eq!(details.delivery.address(), Some("Av. Belgrano 123"));
        assert_eq!(details.notes.as_deref(), Some("Timbre 2"));
    }

    #[test]
    fn test_missing_names_reported() {
        let errors = CheckoutForm::default().validate().err().unwrap_or_default();
        assert_eq!(errors.len(), 2);
    }
}
