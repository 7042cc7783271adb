use axum::{
    Router,
    extract::State,
    response::IntoResponse,
    routing::post,
};

use crate::{
    AppState,
    models::tournament::Tournament,
    payloads::{GenerateRoundQuery, validate_tournament},
    responses::{AppResponse, Json, Query, SuccessResponse},
    services::{pairing_service::PairingMethod, standings_service},
};

async fn generate_round(
    State(default_method): State<PairingMethod>,
    Query(query): Query<GenerateRoundQuery>,
    Json(tournament): Json<Tournament>,
) -> impl IntoResponse {
    let method = match query.strategy.as_deref().map(PairingMethod::try_from) {
        Some(Ok(method)) => method,
        Some(Err(e)) => return e.into_response(),
        None => default_method,
    };
    if let Err(e) = validate_tournament(&tournament) {
        return e.into_response();
    }
    let round = method.generate(&tournament);
    AppResponse::Success {
        payload: SuccessResponse::RoundGenerated {
            strategy: method.to_string(),
            round,
        },
    }
    .into_response()
}

async fn compute_standings(Json(tournament): Json<Tournament>) -> impl IntoResponse {
    match validate_tournament(&tournament) {
        Ok(()) => Into::<AppResponse>::into(standings_service::compute_standings(&tournament))
            .into_response(),
        Err(e) => e.into_response(),
    }
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/rounds/generate", post(generate_round))
        .route("/standings", post(compute_standings))
        .with_state(state)
}
