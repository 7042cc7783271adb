use axum::{
    Json as AxumJson,
    extract::{
        FromRequest, FromRequestParts, Query as AxumQuery, Request,
        rejection::JsonRejection,
    },
    http::{StatusCode, request::Parts},
    response::IntoResponse,
};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    errors::AppError,
    models::tournament::{Pairing, Round, StandingsEntry},
};

#[derive(Debug, Serialize)]
#[serde(tag = "status")]
#[serde(rename_all = "camelCase")]
pub enum AppResponse {
    Error { error: ErrorResponse },
    Success { payload: SuccessResponse },
}

pub struct Json<T>(pub T);

impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
    AxumJson<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match AxumJson::<T>::from_request(req, state).await {
            Ok(json) => Ok(Json(json.0)),
            Err(rej) => match rej {
                JsonRejection::JsonDataError(e) => Err(AppError::JsonDataError(e.body_text())),
                JsonRejection::JsonSyntaxError(e) => Err(AppError::JsonSyntaxError(e.to_string())),
                JsonRejection::MissingJsonContentType(_) => Err(AppError::MissingContentType),
                _ => Err(AppError::JsonUnknownError),
            },
        }
    }
}

pub struct Query<T>(pub T);

impl<S, T> FromRequestParts<S> for Query<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match AxumQuery::<T>::from_request_parts(parts, state).await {
            Ok(query) => Ok(Query(query.0)),
            Err(rej) => Err(AppError::InvalidQuery(rej.body_text())),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing)]
    pub status_code: StatusCode,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
#[serde(rename_all_fields = "camelCase")]
#[serde(tag = "type")]
pub enum SuccessResponse {
    RoundGenerated { strategy: String, round: Round },
    Standings { standings: Vec<StandingsEntry> },
    ScoresRecorded { pairing: Pairing },
}

impl From<Vec<StandingsEntry>> for AppResponse {
    fn from(value: Vec<StandingsEntry>) -> Self {
        Self::Success {
            payload: SuccessResponse::Standings { standings: value },
        }
    }
}

impl From<Pairing> for AppResponse {
    fn from(value: Pairing) -> Self {
        Self::Success {
            payload: SuccessResponse::ScoresRecorded { pairing: value },
        }
    }
}

impl IntoResponse for AppResponse {
    fn into_response(self) -> axum::response::Response {
        match self {
            AppResponse::Error { error } => {
                let status_code = error.status_code;
                (status_code, AxumJson(AppResponse::Error { error })).into_response()
            }
            AppResponse::Success { payload: _ } => (StatusCode::OK, AxumJson(self)).into_response(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status_code = match &self {
            AppError::JsonUnknownError => StatusCode::BAD_REQUEST,
            AppError::MissingContentType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::JsonSyntaxError(_) => StatusCode::BAD_REQUEST,
            AppError::JsonDataError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InvalidPairingMethod(_) => StatusCode::BAD_REQUEST,
            AppError::DuplicatePlayerId(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::SelfPairing {
                table: _,
                player: _,
            } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::ByeCannotBeScored(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidConfig(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        AppResponse::Error {
            error: ErrorResponse {
                code: self.code(),
                message: format!("{}", self),
                status_code,
            },
        }
        .into_response()
    }
}
