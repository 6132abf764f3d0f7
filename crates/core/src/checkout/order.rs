//! Order message for a cart checkout.

use serde::{Deserialize, Serialize};

use super::{CustomerName, Delivery, PaymentMethod, SIGN_OFF};
use crate::cart::{CartLineItem, CartState};
use crate::types::Price;

/// Placeholder used when the customer leaves the notes field empty.
const NO_NOTES: &str = "Ninguna";

/// Customer fields collected by the checkout form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutDetails {
    pub customer: CustomerName,
    pub payment: PaymentMethod,
    pub delivery: Delivery,
    pub notes: Option<String>,
}

/// Format one cart line, e.g. `- Remera - Talle: M (x2)`.
#[must_use]
pub fn format_line(item: &CartLineItem) -> String {
    match item.size() {
        Some(size) => format!("- {} - Talle: {size} (x{})", item.name(), item.quantity()),
        None => format!("- {} (x{})", item.name(), item.quantity()),
    }
}

/// Build the WhatsApp order message for a cart.
///
/// The delivery address appears only for home delivery, and empty notes are
/// written as "Ninguna". Never fails: missing optional fields are left out.
#[must_use]
pub fn compose_order_message(cart: &CartState, details: &CheckoutDetails) -> String {
    let mut lines = vec![
        "¡Hola! Me gustaría realizar un pedido con los siguientes datos:".to_owned(),
        String::new(),
        format!("👤 Nombre y Apellido: {}", details.customer.full()),
        format!("💳 Método de pago: {}", details.payment.label()),
        format!("📦 Entrega o envío: {}", details.delivery.label()),
    ];

    if let Some(address) = details.delivery.address().map(str::trim).filter(|a| !a.is_empty()) {
        lines.push(format!("🏠 Dirección de entrega: {address}"));
    }

    lines.push(String::new());
    lines.push("🛍️ Productos:".to_owned());
    lines.extend(cart.items().iter().map(format_line));

    lines.push(String::new());
    lines.push(format!("💰 Total: {}", Price::ars(cart.total())));

    lines.push(String::new());
    lines.push("📝 Aclaraciones:".to_owned());
    lines.push(
        details
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|notes| !notes.is_empty())
            .unwrap_or(NO_NOTES)
            .to_owned(),
    );

    lines.push(String::new());
    lines.push(SIGN_OFF.to_owned());

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::cart::{CartAction, reduce};
    use crate::types::ProductId;

    fn remera_cart() -> CartState {
        let remera = CartLineItem::new(
            ProductId::new(2),
            "Remera",
            Decimal::from(20),
            Some("M".to_owned()),
        )
        .with_quantity(2);
        reduce(CartState::new(), &CartAction::AddItem(remera))
    }

    fn details(delivery: Delivery, notes: Option<&str>) -> CheckoutDetails {
        CheckoutDetails {
            customer: CustomerName::new("Lucía", "Gómez"),
            payment: PaymentMethod::MercadoPago,
            delivery,
            notes: notes.map(str::to_owned),
        }
    }

    #[test]
    fn test_pickup_message() {
        let message = compose_order_message(&remera_cart(), &details(Delivery::Pickup, None));

        assert!(message.contains("- Remera - Talle: M (x2)"));
        assert!(message.contains("📝 Aclaraciones:\nNinguna"));
        assert!(message.contains("📦 Entrega o envío: Retirar en local"));
        assert!(!message.contains("Dirección"));
    }

    #[test]
    fn test_home_delivery_includes_address() {
        let delivery = Delivery::HomeDelivery {
            address: " Av. Belgrano 123, Santiago del Estero ".to_owned(),
        };
        let message = compose_order_message(&remera_cart(), &details(delivery, Some("Timbre 2")));

        assert!(message.contains("🏠 Dirección de entrega: Av. Belgrano 123, Santiago del Estero\n"));
        assert!(message.contains("📦 Entrega o envío: Envío a domicilio"));
        assert!(message.contains("📝 Aclaraciones:\nTimbre 2"));
        assert!(!message.contains("Ninguna"));
    }

    #[test]
    fn test_header_and_footer() {
        let message = compose_order_message(&remera_cart(), &details(Delivery::Pickup, Some("  ")));

        assert!(message.starts_with("¡Hola! Me gustaría realizar un pedido"));
        assert!(message.contains("👤 Nombre y Apellido: Lucía Gómez"));
        assert!(message.contains("💳 Método de pago: Mercado Pago"));
        assert!(message.contains("💰 Total: $40.00"));
        assert!(message.contains("Ninguna"));
        assert!(message.ends_with(SIGN_OFF));
    }

    #[test]
    fn test_line_without_size() {
        let taza = CartLineItem::new(ProductId::new(5), "Taza Rock & Coffee", Decimal::new(1899, 2), None);
        assert_eq!(format_line(&taza), "- Taza Rock & Coffee (x1)");
    }

    #[test]
    fn test_lines_follow_cart_order() {
        let cart = [
            CartLineItem::new(ProductId::new(9), "Gorra", Decimal::from(25), None),
            CartLineItem::new(ProductId::new(2), "Remera", Decimal::from(20), Some("L".to_owned())),
        ]
        .into_iter()
        .fold(CartState::new(), |state, item| reduce(state, &CartAction::AddItem(item)));

        let message = compose_order_message(&cart, &details(Delivery::Pickup, None));
        let gorra = message.find("- Gorra (x1)");
        let remera = message.find("- Remera - Talle: L (x1)");
        assert!(gorra.is_some(), "missing gorra line in:\n{message}");
        assert!(remera.is_some(), "missing remera line in:\n{message}");
        assert!(gorra < remera);
    }

    #[test]
    fn test_blank_home_delivery_address_is_omitted() {
        let delivery = Delivery::HomeDelivery {
            address: "   ".to_owned(),
        };
        let message = compose_order_message(&remera_cart(), &details(delivery, None));

        assert!(message.contains("📦 Entrega o envío: Envío a domicilio"));
        assert!(!message.contains("Dirección"));
    }
}
