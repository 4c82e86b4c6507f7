//! Axum route handlers for the Positions API.

use axum::{extract::Path, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::positions::catalog::{catalog, lookup, JobProfile, PositionKey};

#[derive(Debug, Serialize)]
pub struct PositionSummary {
    pub key: PositionKey,
    pub display_name: &'static str,
    pub display_name_localized: &'static str,
    pub description: &'static str,
    pub must_have_skills: &'static [&'static str],
    pub nice_to_have_skills: &'static [&'static str],
    pub min_experience: String,
}

impl From<&'static JobProfile> for PositionSummary {
    fn from(profile: &'static JobProfile) -> Self {
        Self {
            key: profile.key,
            display_name: profile.display_name,
            display_name_localized: profile.display_name_localized,
            description: profile.description,
            must_have_skills: profile.must_have_skills,
            nice_to_have_skills: profile.nice_to_have_skills,
            min_experience: format!("{}+ years", profile.min_experience_years),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PositionListResponse {
    pub positions: Vec<PositionSummary>,
}

/// GET /api/v1/positions
pub async fn handle_list_positions() -> Json<PositionListResponse> {
    Json(PositionListResponse {
        positions: catalog().iter().map(PositionSummary::from).collect(),
    })
}

/// GET /api/v1/positions/:key
pub async fn handle_get_position(
    Path(key): Path<String>,
) -> Result<Json<PositionSummary>, AppError> {
    let profile = lookup(&key).ok_or(AppError::UnknownPosition(key))?;
    Ok(Json(PositionSummary::from(profile)))
}
