//! Reservation message for a tour.

use serde::{Deserialize, Serialize};

use super::{CustomerName, PaymentMethod, SIGN_OFF};

/// The tour fields quoted in a reservation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TourSummary {
    pub title: String,
    pub destination: String,
    pub dates: String,
}

/// Customer fields collected by the reservation form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationDetails {
    pub customer: CustomerName,
    pub payment: PaymentMethod,
    /// Number of travellers, at least 1.
    pub participants: u32,
}

/// Build the WhatsApp reservation message for a tour.
///
/// When the tour is unknown the title reads "No especificado" and the
/// destination and dates lines are left out.
#[must_use]
pub fn compose_reservation_message(
    tour: Option<&TourSummary>,
    details: &ReservationDetails,
) -> String {
    let mut lines = vec![
        "¡Hola! Me gustaría reservar un tour con los siguientes detalles:".to_owned(),
        String::new(),
    ];

    match tour {
        Some(tour) => {
            lines.push(format!("🌟 Tour seleccionado: {}", tour.title));
            lines.push(format!("📍 Destino: {}", tour.destination));
            lines.push(format!("📅 Fechas: {}", tour.dates));
        }
        None => lines.push("🌟 Tour seleccionado: No especificado".to_owned()),
    }

    lines.push(format!("👤 Nombre: {}", details.customer.full()));
    lines.push(format!("💳 Método de pago: {}", details.payment.label()));
    lines.push(format!("👥 Personas: {}", details.participants.max(1)));
    lines.push(String::new());
    lines.push(SIGN_OFF.to_owned());

    lines.join("\n")
}
