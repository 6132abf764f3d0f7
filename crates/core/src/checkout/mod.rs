//! Outbound WhatsApp messages for orders and tour reservations.
//!
//! Composers are pure: they turn a cart (or a tour) and the customer's form
//! fields into text. Building the link and sending the shopper there is the
//! caller's job.

mod order;
mod reservation;

use serde::{Deserialize, Serialize};

pub use order::{CheckoutDetails, compose_order_message, format_line};
pub use reservation::{ReservationDetails, TourSummary, compose_reservation_message};

/// Closing line shared by every outbound message.
const SIGN_OFF: &str = "Quedo atento/a a la confirmación. ¡Muchas gracias!";

/// How the customer intends to pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Cash,
    MercadoPago,
}

impl PaymentMethod {
    /// Label shown to the shop owner.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Cash => "Efectivo",
            Self::MercadoPago => "Mercado Pago",
        }
    }

    /// All methods, in the order the checkout form lists them.
    #[must_use]
    pub const fn all() -> [Self; 2] {
        [Self::Cash, Self::MercadoPago]
    }

    /// Form value, matching the serde representation.
    #[must_use]
    pub const fn value(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::MercadoPago => "mercado_pago",
        }
    }
}

/// The delivery choice as submitted by a form, before an address is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryKind {
    #[default]
    Pickup,
    HomeDelivery,
}

impl DeliveryKind {
    #[must_use]
    pub const fn all() -> [Self; 2] {
        [Self::Pickup, Self::HomeDelivery]
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pickup => "Retirar en local",
            Self::HomeDelivery => "Envío a domicilio",
        }
    }

    #[must_use]
    pub const fn value(&self) -> &'static str {
        match self {
            Self::Pickup => "pickup",
            Self::HomeDelivery => "home_delivery",
        }
    }
}

/// How the order reaches the customer. Only home delivery carries an address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Delivery {
    Pickup,
    HomeDelivery { address: String },
}

impl Delivery {
    #[must_use]
    pub const fn kind(&self) -> DeliveryKind {
        match self {
            Self::Pickup => DeliveryKind::Pickup,
            Self::HomeDelivery { .. } => DeliveryKind::HomeDelivery,
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.kind().label()
    }

    /// Delivery address, present only for home delivery.
    #[must_use]
    pub fn address(&self) -> Option<&str> {
        match self {
            Self::Pickup => None,
            Self::HomeDelivery { address } => Some(address),
        }
    }
}

/// Customer first name and surname as typed into a form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerName {
    pub first: String,
    pub last: String,
}

impl CustomerName {
    #[must_use]
    pub fn new(first: impl Into<String>, last: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            last: last.into(),
        }
    }

    /// Trimmed `"first last"`, without stray spaces when either part is empty.
    #[must_use]
    pub fn full(&self) -> String {
        [self.first.trim(), self.last.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.first.trim().is_empty() && self.last.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_full_name() {
        assert_eq!(CustomerName::new(" Ana ", "Pérez").full(), "Ana Pérez");
        assert_eq!(CustomerName::new("Ana", "").full(), "Ana");
        assert!(CustomerName::new(" ", "").is_blank());
    }

    #[test]
    fn test_delivery_address_only_for_home_delivery() {
        assert_eq!(Delivery::Pickup.address(), None);
        let home = Delivery::HomeDelivery {
            address: "Av. Belgrano 123".to_owned(),
        };
        assert_eq!(home.address(), Some("Av. Belgrano 123"));
        assert_eq!(home.kind(), DeliveryKind::HomeDelivery);
        assert_eq!(home.label(), "Envío a domicilio");
    }

    #[test]
    fn test_form_values_match_serde() {
        for method in PaymentMethod::all() {
            let json = serde_json::to_value(method).unwrap_or_default();
            assert_eq!(json, method.value());
        }
        for kind in DeliveryKind::all() {
            let json = serde_json::to_value(kind).unwrap_or_default();
            assert_eq!(json, kind.value());
        }
    }
}
