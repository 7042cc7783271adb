use axum::{Router, response::IntoResponse, routing::post};

use crate::{
    payloads::RecordScores,
    responses::{AppResponse, Json},
};

async fn record_scores(Json(payload): Json<RecordScores>) -> impl IntoResponse {
    match payload
        .pairing
        .record_scores(payload.score_a, payload.score_b)
    {
        Ok(pairing) => Into::<AppResponse>::into(pairing).into_response(),
        Err(e) => e.into_response(),
    }
}

pub fn routes() -> Router {
    Router::new().route("/scores", post(record_scores))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;

    async fn post_scores(body: Value) -> (StatusCode, Value) {
        let request = Request::post("/scores")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = routes().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_record_scores() {
        let (status, body) = post_scores(json!({
            "pairing": { "table": 2, "playerA": "p3", "playerB": "p4" },
            "scoreA": 45,
            "scoreB": 60
        }))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["payload"]["type"], "scoresRecorded");
        assert_eq!(
            body["payload"]["pairing"],
            json!({
                "table": 2,
                "playerA": "p3",
                "playerB": "p4",
                "scoreA": 45,
                "scoreB": 60,
                "resultA": "LOSS",
                "resultB": "WIN"
            })
        );
    }

    #[tokio::test]
    async fn test_record_scores_on_bye() {
        let (status, body) = post_scores(json!({
            "pairing": { "table": 3, "playerA": "p5", "playerB": null },
            "scoreA": 20,
            "scoreB": 0
        }))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "ByeCannotBeScored");
    }

    #[tokio::test]
    async fn test_record_scores_requires_integers() {
        let (status, body) = post_scores(json!({
            "pairing": { "table": 1, "playerA": "p1", "playerB": "p2" },
            "scoreA": "ten",
            "scoreB": 0
        }))
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "JsonDataError");
    }
}
