use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use productivity_coach::analysis::{BehavioralTag, TextAnalyzer};
use productivity_coach::assessment::Profile;
use productivity_coach::chat::{chat_router, ChatService, SessionStore};
use productivity_coach::error::AppError;
use productivity_coach::recommendations::{select, Recommendations};
use productivity_coach::session::{
    descriptive_answers, evaluate_once, summarize, AssessmentRecord,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Deserialize)]
pub(crate) struct AssessmentRequest {
    pub(crate) choices: Vec<u8>,
    #[serde(default)]
    pub(crate) challenge: String,
    #[serde(default)]
    pub(crate) focus_time: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecommendationRequest {
    pub(crate) profile: String,
    #[serde(default)]
    pub(crate) tags: Vec<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RecommendationResponse {
    pub(crate) profile: Profile,
    pub(crate) tags: BTreeSet<BehavioralTag>,
    pub(crate) summary: String,
    pub(crate) recommendations: Recommendations,
}

pub(crate) fn with_assessment_routes<S>(service: Arc<ChatService<S>>) -> axum::Router
where
    S: SessionStore + 'static,
{
    chat_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/assessment",
            axum::routing::post(assessment_endpoint),
        )
        .route(
            "/api/v1/recommendations",
            axum::routing::post(recommendations_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn assessment_endpoint(
    Extension(analyzer): Extension<Arc<TextAnalyzer>>,
    Json(payload): Json<AssessmentRequest>,
) -> Result<Json<AssessmentRecord>, AppError> {
    let AssessmentRequest {
        choices,
        challenge,
        focus_time,
    } = payload;

    let answers = descriptive_answers([challenge, focus_time]);
    let record = evaluate_once(&analyzer, &choices, answers)?;
    info!(
        score = record.system_output.mcq_score,
        profile = %record.system_output.profile,
        "assessment evaluated"
    );
    Ok(Json(record))
}

pub(crate) async fn recommendations_endpoint(
    Json(payload): Json<RecommendationRequest>,
) -> Result<Json<RecommendationResponse>, AppError> {
    let profile: Profile = payload.profile.parse()?;
    let tags = payload
        .tags
        .iter()
        .map(|raw| raw.parse::<BehavioralTag>())
        .collect::<Result<BTreeSet<_>, _>>()?;

    Ok(Json(RecommendationResponse {
        profile,
        summary: summarize(profile, &tags),
        recommendations: select(profile, &tags),
        tags,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::InMemorySessionStore;
    use crate::test_support::has_tip;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use productivity_coach::assessment::Profile;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn app(ready: bool) -> (axum::Router, InMemorySessionStore) {
        let analyzer = Arc::new(TextAnalyzer::default());
        let store = InMemorySessionStore::default();
        let service = Arc::new(ChatService::new(Arc::new(store.clone()), analyzer.clone()));
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        let router = with_assessment_routes(service)
            .layer(Extension(analyzer))
            .layer(Extension(state));
        (router, store)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        serde_json::from_slice(&bytes).expect("json body")
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request builds")
    }

    #[tokio::test]
    async fn assessment_endpoint_scores_request() {
        let request = AssessmentRequest {
            choices: vec![4; 10],
            challenge: "I am burned out and exhausted".to_string(),
            focus_time: String::new(),
        };

        let Json(record) = assessment_endpoint(
            Extension(Arc::new(TextAnalyzer::default())),
            Json(request),
        )
        .await
        .expect("assessment evaluates");

        assert_eq!(record.system_output.mcq_score, 18);
        assert_eq!(record.system_output.profile, Profile::ModeratelyDistracted);
        assert!(has_tip(
            &record.system_output.recommendations,
            "Guided Calming Audio"
        ));
        assert_eq!(record.user_input.descriptive_answers.len(), 2);
    }

    #[tokio::test]
    async fn assessment_route_rejects_out_of_range_choices() {
        let (router, _) = app(true);
        let response = router
            .oneshot(post_json(
                "/api/v1/assessment",
                json!({ "choices": [1, 2, 3, 4, 5, 1, 2, 3, 4, 1] }),
            ))
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"]
            .as_str()
            .expect("error message")
            .contains("question 5"));
    }

    #[tokio::test]
    async fn assessment_route_returns_record_json() {
        let (router, _) = app(true);
        let response = router
            .oneshot(post_json(
                "/api/v1/assessment",
                json!({
                    "choices": [1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
                    "challenge": "Notifications distract me",
                }),
            ))
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["system_output"]["mcq_score"], 12);
        assert_eq!(body["system_output"]["profile"], "Moderately Distracted");
        assert_eq!(
            body["system_output"]["nlp_analysis"]["all_tags"],
            json!(["distraction"])
        );
    }

    #[tokio::test]
    async fn readiness_reflects_flag() {
        let (router, _) = app(false);
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/ready")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body_json(response).await["status"], "initializing");
    }

    #[tokio::test]
    async fn chat_routes_share_the_in_memory_store() {
        let (router, store) = app(true);
        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/chat/sessions")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        let session_id = body["session_id"].as_str().expect("session id").to_string();
        assert_eq!(store.len(), 1);

        let response = router
            .oneshot(post_json(
                &format!("/api/v1/chat/sessions/{session_id}/messages"),
                json!({ "content": "3" }),
            ))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["stage"], "multiple_choice");
    }

    #[tokio::test]
    async fn recommendations_route_parses_labels() {
        let (router, _) = app(true);
        let response = router
            .oneshot(post_json(
                "/api/v1/recommendations",
                json!({ "profile": "burnout risk", "tags": ["Burnout", "time anxiety"] }),
            ))
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["profile"], "Burnout Risk");
        assert_eq!(body["tags"], json!(["time anxiety", "burnout"]));
        let basic = body["recommendations"]["Basic (Free)"]
            .as_array()
            .expect("basic tier");
        assert!(basic
            .iter()
            .any(|entry| entry.as_str().is_some_and(|tip| tip.starts_with("Mindful Break: "))));
        assert!(body["summary"]
            .as_str()
            .expect("summary")
            .contains("potential burnout and pressure"));
    }

    #[tokio::test]
    async fn recommendations_route_rejects_unknown_labels() {
        for payload in [
            json!({ "profile": "Night Owl", "tags": [] }),
            json!({ "profile": "Focused Achiever", "tags": ["boredom"] }),
        ] {
            let (router, _) = app(true);
            let response = router
                .oneshot(post_json("/api/v1/recommendations", payload.clone()))
                .await
                .expect("router responds");

            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{payload}");
            let body = body_json(response).await;
            assert!(body["error"]
                .as_str()
                .expect("error message")
                .starts_with("invalid recommendation input"));
        }
    }
}
