use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Json, Path, Query, State,
    },
    http::StatusCode,
};
use wordgame_common::*;

use crate::{
    error::{ServiceError, ServiceResult},
    validation, AppState,
};

pub async fn create_player(
    State(state): State<AppState>,
    payload: Result<Json<CreatePlayerRequest>, JsonRejection>,
) -> ServiceResult<(StatusCode, Json<PlayerView>)> {
    let Json(request) = payload.map_err(|e| {
        log::info!("API: Rejected create player body: {e}");
        ServiceError::BadRequest(e.body_text())
    })?;
    let username = validation::validate_username(&request.username)?;

    let player = state.players.create(&username).await?;
    Ok((StatusCode::CREATED, Json(player)))
}

pub async fn get_player_by_id(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ServiceResult<Json<PlayerView>> {
    let Path(id) = id.map_err(|e| ServiceError::BadRequest(e.body_text()))?;

    match state.players.find_by_id(id).await {
        Ok(player) => {
            log::debug!("API: Successfully fetched player {id}");
            Ok(Json(player))
        }
        Err(e) => {
            log::debug!("API: Player {id} lookup failed: {e}");
            Err(e)
        }
    }
}

pub async fn get_player(
    State(state): State<AppState>,
    params: Result<Query<PlayerLookupQuery>, QueryRejection>,
) -> ServiceResult<Json<PlayerView>> {
    let Query(params) = params.map_err(|e| ServiceError::BadRequest(e.body_text()))?;
    let Some(username) = params.username else {
        return ServiceError::bad_request("missing 'username' query parameter");
    };
    // Stored names are trimmed on create, so look up the same form.
    let username = validation::validate_username(&username)?;
    let player = state.players.find_by_username(&username).await?;
    Ok(Json(player))
}

pub async fn get_leaderboard(
    State(state): State<AppState>,
    params: Result<Query<LeaderboardQuery>, QueryRejection>,
) -> ServiceResult<Json<Vec<PlayerSummaryView>>> {
    let Query(params) = params.map_err(|e| ServiceError::BadRequest(e.body_text()))?;
    let limit = params.limit.unwrap_or(10).clamp(1, 100);
    let entries = state.players.top_players(limit).await?;
    Ok(Json(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{create_test_db, set_score, Database};
    use crate::server_init::{build_router, build_state};
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, Response},
        Router,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    async fn create_test_app() -> (Router, Database) {
        let db = create_test_db().await;
        let router = build_router(build_state(db.clone()));
        (router, db)
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: Response<Body>) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_create_player_returns_created_view() {
        let (app, _db) = create_test_app().await;

        let response = app
            .oneshot(post_json("/api/players", r#"{"username":"alice"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "id": 1, "username": "alice", "score": 0 })
        );
    }

    #[tokio::test]
    async fn test_create_player_ignores_requested_score() {
        let (app, _db) = create_test_app().await;

        let response = app
            .oneshot(post_json("/api/players", r#"{"username":"greedy","score":9000}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body_json(response).await["score"], 0);
    }

    #[tokio::test]
    async fn test_get_player_after_create() {
        let (app, _db) = create_test_app().await;

        let created = app
            .clone()
            .oneshot(post_json("/api/players", r#"{"username":"alice"}"#))
            .await
            .unwrap();
        let created = body_json(created).await;

        let response = app.oneshot(get("/api/players/1")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let fetched = body_json(response).await;
        assert_eq!(fetched, created);
        assert_eq!(fetched["id"], 1);
        assert_eq!(fetched["username"], "alice");
        assert_eq!(fetched["score"], 0);
    }

    #[tokio::test]
    async fn test_get_missing_player_is_not_found() {
        let (app, _db) = create_test_app().await;

        let response = app.oneshot(get("/api/players/999")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert!(body["error"].is_string());
        assert!(body.get("id").is_none());
        assert!(body.get("username").is_none());
    }

    #[tokio::test]
    async fn test_get_player_with_non_numeric_id() {
        let (app, _db) = create_test_app().await;

        let response = app.oneshot(get("/api/players/abc")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_blank_username_is_rejected_without_insert() {
        let (app, db) = create_test_app().await;

        for body in [r#"{"username":""}"#, r#"{"username":"   "}"#, r#"{}"#, "not json"] {
            let response = app
                .clone()
                .oneshot(post_json("/api/players", body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
            assert!(body_json(response).await["error"].is_string());
        }

        assert_eq!(db.count_players().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_missing_content_type_is_bad_request() {
        let (app, db) = create_test_app().await;
        let request = Request::builder()
            .method("POST")
            .uri("/api/players")
            .body(Body::from(r#"{"username":"alice"}"#))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(db.count_players().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_lookup_by_username() {
        let (app, _db) = create_test_app().await;
        app.clone()
            .oneshot(post_json("/api/players", r#"{"username":"alice"}"#))
            .await
            .unwrap();

        let found = app
            .clone()
            .oneshot(get("/api/players?username=alice"))
            .await
            .unwrap();
        assert_eq!(found.status(), StatusCode::OK);
        assert_eq!(body_json(found).await["id"], 1);

        let missing = app
            .clone()
            .oneshot(get("/api/players?username=bob"))
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let no_param = app.oneshot(get("/api/players")).await.unwrap();
        assert_eq!(no_param.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_lookup_by_username_trims_like_create() {
        let (app, _db) = create_test_app().await;
        app.clone()
            .oneshot(post_json("/api/players", r#"{"username":"  alice "}"#))
            .await
            .unwrap();

        let padded = app
            .clone()
            .oneshot(get("/api/players?username=%20alice%20"))
            .await
            .unwrap();
        assert_eq!(padded.status(), StatusCode::OK);
        assert_eq!(body_json(padded).await["username"], "alice");

        let blank = app
            .oneshot(get("/api/players?username=%20%20"))
            .await
            .unwrap();
        assert_eq!(blank.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(blank).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_malformed_leaderboard_limit_is_json_bad_request() {
        let (app, _db) = create_test_app().await;

        let response = app
            .oneshot(get("/api/leaderboard?limit=abc"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_leaderboard_orders_and_limits() {
        let (app, db) = create_test_app().await;
        for name in ["alice", "bob", "carol"] {
            let body = format!(r#"{{"username":"{name}"}}"#);
            app.clone()
                .oneshot(post_json("/api/players", &body))
                .await
                .unwrap();
        }
        set_score(&db, 1, 5).await;
        set_score(&db, 2, 20).await;
        set_score(&db, 3, 5).await;

        let response = app
            .clone()
            .oneshot(get("/api/leaderboard?limit=2"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            serde_json::json!([
                { "username": "bob", "score": 20 },
                { "username": "alice", "score": 5 },
            ])
        );

        let clamped = app
            .oneshot(get("/api/leaderboard?limit=0"))
            .await
            .unwrap();
        assert_eq!(body_json(clamped).await.as_array().unwrap().len(), 1);
    }
}
