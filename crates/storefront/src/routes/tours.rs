//! Tour listing and reservation handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use locura_core::{
    CustomerName, PaymentMethod, ReservationDetails, TourId, compose_reservation_message,
};

use crate::db::{RepositoryError, TourQuery};
use crate::error::{AppError, add_breadcrumb};
use crate::filters;
use crate::middleware::CspNonce;
use crate::models::{Tour, TourFilters};
use crate::state::AppState;

/// Most travellers one reservation message can ask for.
const MAX_PARTICIPANTS: u32 = 50;

/// Tour listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "tours/index.html")]
pub struct ToursIndexTemplate {
    pub tours: Vec<Tour>,
    pub tour_filters: TourFilters,
    pub destination: String,
    pub grupo: String,
    pub nonce: String,
}

/// Reservation form data.
#[derive(Debug, Clone, Deserialize)]
pub struct ReservationForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub payment: PaymentMethod,
    #[serde(default = "default_participants")]
    pub participants: u32,
}

const fn default_participants() -> u32 {
    1
}

impl Default for ReservationForm {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            payment: PaymentMethod::default(),
            participants: default_participants(),
        }
    }
}

impl ReservationForm {
    /// Turn the submitted fields into reservation details, or list what is missing.
    ///
    /// Participants are clamped to `1..=50`.
    ///
    /// # Errors
    ///
    /// Returns one message per missing field.
    pub fn validate(&self) -> Result<ReservationDetails, Vec<&'static str>> {
        let mut errors = Vec::new();
        if self.first_name.trim().is_empty() {
            errors.push("Ingresá tu nombre.");
        }
        if self.last_name.trim().is_empty() {
            errors.push("Ingresá tu apellido.");
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ReservationDetails {
            customer: CustomerName::new(self.first_name.trim(), self.last_name.trim()),
            payment: self.payment,
            participants: self.participants.clamp(1, MAX_PARTICIPANTS),
        })
    }
}

/// Reservation form template.
#[derive(Template, WebTemplate)]
#[template(path = "tours/reserve.html")]
pub struct ReserveTemplate {
    pub tour: Tour,
    pub form: ReservationForm,
    pub errors: Vec<&'static str>,
    pub payment_methods: [PaymentMethod; 2],
    pub nonce: String,
}

/// Display tours, optionally filtered by destination and grupo.
///
/// # Errors
///
/// Returns `AppError::Database` if the catalog cannot be read.
#[instrument(skip(state, nonce))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<TourQuery>,
    CspNonce(nonce): CspNonce,
) -> Result<impl IntoResponse, AppError> {
    let tours = state.catalog().tours(&query).await?;
    let tour_filters = state.catalog().tour_filters().await?;

    Ok(ToursIndexTemplate {
        tours,
        tour_filters,
        destination: query.destination.unwrap_or_default(),
        grupo: query.grupo.unwrap_or_default(),
        nonce,
    })
}

/// Display the reservation form for a tour.
///
/// # Errors
///
/// Returns `AppError::Database` (404) if the tour does not exist.
#[instrument(skip(state, nonce))]
pub async fn reserve_form(
    State(state): State<AppState>,
    Path(id): Path<TourId>,
    CspNonce(nonce): CspNonce,
) -> Result<impl IntoResponse, AppError> {
    let tour = state.catalog().tour(id).await?;

    Ok(ReserveTemplate {
        tour,
        form: ReservationForm::default(),
        errors: Vec::new(),
        payment_methods: PaymentMethod::all(),
        nonce,
    })
}

/// Compose the reservation message and redirect to WhatsApp.
///
/// A tour deleted while the form was open still produces a message, with the
/// tour reported as "No especificado".
///
/// # Errors
///
/// Returns `AppError::Database` if the tour lookup fails for any reason other
/// than the tour being gone.
#[instrument(skip(state, nonce))]
pub async fn reserve(
    State(state): State<AppState>,
    Path(id): Path<TourId>,
    CspNonce(nonce): CspNonce,
    Form(form): Form<ReservationForm>,
) -> Result<Response, AppError> {
    let tour = match state.catalog().tour(id).await {
        Ok(tour) => Some(tour),
        Err(RepositoryError::NotFound) => None,
        Err(e) => return Err(e.into()),
    };

    let details = match form.validate() {
        Ok(details) => details,
        Err(errors) => {
            let Some(tour) = tour else {
                return Err(AppError::NotFound(format!("tour {id}")));
            };
            return Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                ReserveTemplate {
                    tour,
                    form,
                    errors,
                    payment_methods: PaymentMethod::all(),
                    nonce,
                },
            )
                .into_response());
        }
    };

    let summary = tour.as_ref().map(Tour::summary);
    let message = compose_reservation_message(summary.as_ref(), &details);
    let tour_id = id.to_string();
    add_breadcrumb(
        "reservation",
        "Reservation sent to WhatsApp",
        Some(&[("tour_id", tour_id.as_str())]),
    );
    tracing::info!(
        participants = details.participants,
        known_tour = tour.is_some(),
        "Reservation handed off to WhatsApp"
    );

    Ok(Redirect::to(&state.whatsapp_link(&message)).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participants_clamped() {
        let form = ReservationForm {
            first_name: "Martín".to_string(),
            last_name: "Sosa".to_string(),
            participants: 0,
            ..ReservationForm::default()
        };
        let details = form.validate().unwrap_or_else(|e| panic!("{e:?}"));
        assert_eq!(details.participants, 1);

        let form = ReservationForm {
            participants: 500,
            ..form
        };
        let details = form.validate().unwrap_or_else(|e| panic!("{e:?}"));
        assert_eq!(details.participants, MAX_PARTICIPANTS);
    }

    #[test]
    fn test_names_required() {
        let errors = ReservationForm::default().validate().err().unwrap_or_default();
        assert_eq!(errors, ["Ingresá tu nombre.", "Ingresá tu apellido."]);
    }
}
