//! End-to-end request pipeline through the Axum router.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use meal_gateway::estimator::Estimator;
use meal_gateway::server::build_router;
use meal_gateway::server::routes::GatewayState;
use meal_gateway::types::Variant;

use crate::fake_provider::FakeProvider;

const PROTEIN_REPLY: &str = r#"Based on typical portions, here is my estimate:

{
  "totalCalories": 780,
  "totalProtein": 45,
  "confidence": "medium",
  "breakdown": [
    { "item": "spaghetti (2 cups)", "calories": 440, "protein": 16 },
    { "item": "meatballs (4)", "calories": 340, "protein": 29 }
  ]
}

Let me know if you want a more detailed breakdown."#;

fn app(provider: &FakeProvider, variant: Variant) -> Router {
    let estimator = Estimator::new(Arc::new(provider.clone()), variant);
    build_router(Arc::new(GatewayState::new(estimator)))
}

async fn post(app: Router, body: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri("/estimate")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

async fn json_body(resp: Response) -> Value {
    let body = axum::body::to_bytes(resp.into_body(), 100_000).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn protein_estimate_round_trip() {
    let provider = FakeProvider::replying(PROTEIN_REPLY);
    let resp = post(
        app(&provider, Variant::Protein),
        r#"{"description":"spaghetti and meatballs"}"#,
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let json = json_body(resp).await;
    assert_eq!(json["totalCalories"], 780);
    assert_eq!(json["totalProtein"], 45);
    assert_eq!(json["confidence"], "medium");
    assert_eq!(json["breakdown"][1]["item"], "meatballs (4)");
    assert_eq!(json["breakdown"][1]["protein"], 29);

    let prompts = provider.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("\"spaghetti and meatballs\""));
    assert!(prompts[0].contains("totalProtein"));
}

#[tokio::test]
async fn calories_variant_accepts_prose_wrapped_object() {
    let provider = FakeProvider::replying(
        "Sure! {\"totalCalories\":500,\"confidence\":\"high\",\"breakdown\":[]}",
    );
    let resp = post(app(&provider, Variant::Calories), r#"{"description":"cheeseburger"}"#).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        json_body(resp).await,
        json!({ "totalCalories": 500, "confidence": "high", "breakdown": [] })
    );
    assert!(!provider.prompts()[0].contains("protein"));
}

#[tokio::test]
async fn invalid_descriptions_never_reach_provider() {
    let provider = FakeProvider::replying(PROTEIN_REPLY);
    for body in [
        r#"{}"#,
        r#"{"description":""}"#,
        r#"{"description":"   "}"#,
        r#"{"description":7}"#,
        r#"{"description":null}"#,
        r#"not json"#,
        r#""#,
    ] {
        let resp = post(app(&provider, Variant::Protein), body).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(json_body(resp).await, json!({ "error": "Meal description is required" }));
    }
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn reply_without_braces_is_invalid_format() {
    let provider = FakeProvider::replying("I'm sorry, I can't estimate that.");
    let resp = post(app(&provider, Variant::Calories), r#"{"description":"mystery stew"}"#).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(resp).await, json!({ "error": "Invalid AI response format" }));
}

#[tokio::test]
async fn missing_confidence_is_invalid_structure_in_both_variants() {
    let provider = FakeProvider::replying("{\"totalCalories\":500,\"totalProtein\":20,\"breakdown\":[]}");
    for variant in [Variant::Calories, Variant::Protein] {
        let resp = post(app(&provider, variant), r#"{"description":"salad"}"#).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(resp).await,
            json!({ "error": "Invalid calorie estimate structure" })
        );
    }
}

#[tokio::test]
async fn protein_variant_rejects_calories_only_reply() {
    let provider = FakeProvider::replying(
        "{\"totalCalories\":500,\"confidence\":\"high\",\"breakdown\":[{\"item\":\"rice\",\"calories\":500}]}",
    );
    let resp = post(app(&provider, Variant::Protein), r#"{"description":"rice"}"#).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(resp).await,
        json!({ "error": "Invalid calorie estimate structure" })
    );
}

#[tokio::test]
async fn provider_failure_message_depends_on_variant() {
    let provider = FakeProvider::failing(429);

    let resp = post(app(&provider, Variant::Protein), r#"{"description":"toast"}"#).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(resp).await, json!({ "error": "Estimation failed" }));

    let resp = post(app(&provider, Variant::Calories), r#"{"description":"toast"}"#).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(resp).await, json!({ "error": "Groq estimation failed" }));

    assert_eq!(provider.calls(), 2);
}

#[tokio::test]
async fn health_is_always_ok() {
    let provider = FakeProvider::failing(500);
    for (variant, message) in [
        (Variant::Protein, "Backend healthy"),
        (Variant::Calories, "Calorie estimator healthy"),
    ] {
        let resp = app(&provider, variant)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(json_body(resp).await, json!({ "status": "ok", "message": message }));
    }
}

#[tokio::test]
async fn reply_is_returned_as_received() {
    let reply = r#"{"totalCalories":500,"totalProtein":null,"confidence":"HIGH","breakdown":[{"item":"rice","calories":500,"protein":"?"}]}"#;
    let provider = FakeProvider::replying(reply);
    let resp = post(app(&provider, Variant::Calories), r#"{"description":"rice"}"#).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let expected: Value = serde_json::from_str(reply).unwrap();
    assert_eq!(json_body(resp).await, expected);
}
