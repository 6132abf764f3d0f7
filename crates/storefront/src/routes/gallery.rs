//! Photo gallery handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::error::AppError;
use crate::filters;
use crate::middleware::CspNonce;
use crate::models::{Album, Photo};
use crate::state::AppState;

/// Gallery page template.
#[derive(Template, WebTemplate)]
#[template(path = "gallery/index.html")]
pub struct GalleryTemplate {
    pub photos: Vec<Photo>,
    pub albums: Vec<Album>,
    pub nonce: String,
}

/// Display standalone photos and albums.
///
/// # Errors
///
/// Returns `AppError::Database` if the gallery cannot be read.
#[instrument(skip(state, nonce))]
pub async fn index(
    State(state): State<AppState>,
    CspNonce(nonce): CspNonce,
) -> Result<impl IntoResponse, AppError> {
    let (photos, albums) = tokio::try_join!(state.catalog().photos(), state.catalog().albums())?;

    Ok(GalleryTemplate {
        photos,
        albums,
        nonce,
    })
}
