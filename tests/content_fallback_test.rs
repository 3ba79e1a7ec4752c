use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::time::Duration;
use tower::util::ServiceExt; // for `oneshot`
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use terramar::config::Config;
use terramar::infrastructure::AppState;
use terramar::server;

fn test_app(cms_url: &str) -> Router {
    let config = Config {
        cms_base_url: cms_url.to_string(),
        cms_token: None,
        cms_timeout_secs: 2,
        cms_webhook_token: Some("hook-secret".to_string()),
        port: 0,
        cors_allowed_origins: Vec::new(),
        fallback_cache_ttl_secs: 300,
        fallback_cache_max_entries: 64,
        static_dir: "static".to_string(),
    };
    let state = AppState::new(config).expect("Failed to build state");
    server::build_router(state)
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

// ---- CMS envelope fixtures ----

fn entry(document_id: &str, fields: Value) -> Value {
    let mut entry = json!({ "id": 1, "documentId": document_id });
    if let (Some(map), Some(extra)) = (entry.as_object_mut(), fields.as_object()) {
        for (key, value) in extra {
            map.insert(key.clone(), value.clone());
        }
    }
    entry
}

fn list_body(entries: Vec<Value>) -> Value {
    let total = entries.len();
    json!({
        "data": entries,
        "meta": {
            "pagination": { "page": 1, "pageSize": 24, "pageCount": 1, "total": total }
        }
    })
}

fn single_body(document: Value) -> Value {
    json!({ "data": document })
}

/// English rendition: text translated, media never uploaded.
fn en_experience() -> Value {
    entry(
        "exp-andes",
        json!({
            "locale": "en",
            "slug": "andes-trek",
            "title": "Andes Trek",
            "summary": "Three days above the clouds",
            "featured": true,
            "localizations": [ { "locale": "es" } ]
        }),
    )
}

/// Spanish rendition: the locale where editors upload the media.
fn es_experience() -> Value {
    entry(
        "exp-andes",
        json!({
            "locale": "es",
            "slug": "andes-trek",
            "title": "Trekking por los Andes",
            "summary": "Tres días sobre las nubes",
            "featured": true,
            "heroImage": { "url": "/uploads/andes.jpg", "alternativeText": "Cordillera" },
            "thumbnail": { "url": "/uploads/andes-thumb.jpg" },
            "gallery": [ { "url": "/uploads/andes-1.jpg" }, { "url": "/uploads/andes-2.jpg" } ],
            "localizations": [ { "locale": "en" } ]
        }),
    )
}

async fn mount_experience(server: &MockServer, locale: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path("/api/experiences"))
        .and(query_param("locale", locale))
        .and(query_param("filters[slug][$eq]", "andes-trek"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_missing_media_backfilled_from_default_locale() {
    let mock_server = MockServer::start().await;
    mount_experience(&mock_server, "en", list_body(vec![en_experience()])).await;
    mount_experience(&mock_server, "es", list_body(vec![es_experience()])).await;

    let app = test_app(&mock_server.uri());
    let (status, body) = get_json(app, "/api/en/experiences/andes-trek").await;
    assert_eq!(status, StatusCode::OK);

    let experience = &body["experience"];
    // Text stays in the requested locale
    assert_eq!(experience["title"], "Andes Trek");
    assert_eq!(experience["locale"], "en");
    // Media comes from the default-locale record, resolved to absolute URLs
    assert_eq!(
        experience["hero_image"]["url"],
        format!("{}/uploads/andes.jpg", mock_server.uri())
    );
    assert_eq!(
        experience["thumbnail"]["url"],
        format!("{}/uploads/andes-thumb.jpg", mock_server.uri())
    );
    assert_eq!(experience["gallery"].as_array().map(|g| g.len()), Some(2));

    // Language-switcher alternates cover the served locale and the es rendition
    let alternates = experience["alternates"].as_array().unwrap();
    let paths: Vec<&str> = alternates
        .iter()
        .filter_map(|a| a["path"].as_str())
        .collect();
    assert!(paths.contains(&"/en/experiences/andes-trek"));
    assert!(paths.contains(&"/es/experiencias/andes-trek"));
}

#[tokio::test]
async fn test_default_locale_payload_is_cached_across_requests() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/experiences"))
        .and(query_param("locale", "es"))
        .and(query_param("filters[slug][$eq]", "andes-trek"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body(vec![es_experience()])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = test_app(&mock_server.uri());
    for _ in 0..3 {
        let (status, body) = get_json(app.clone(), "/api/es/experiences/andes-trek").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["experience"]["title"], "Trekking por los Andes");
    }
    // Mock verifies exactly one upstream call on drop
}

#[tokio::test]
async fn test_concurrent_requests_share_one_upstream_fetch() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/experiences"))
        .and(query_param("locale", "es"))
        .and(query_param("filters[slug][$eq]", "andes-trek"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(list_body(vec![es_experience()]))
                .set_delay(Duration::from_millis(100)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = test_app(&mock_server.uri());
    let mut handles = Vec::new();
    for _ in 0..4 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            get_json(app, "/api/es/experiences/andes-trek").await
        }));
    }
    for handle in handles {
        let (status, body) = handle.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["experience"]["title"], "Trekking por los Andes");
    }
}

#[tokio::test]
async fn test_webhook_invalidation_forces_a_refetch() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/experiences"))
        .and(query_param("locale", "es"))
        .and(query_param("filters[slug][$eq]", "andes-trek"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body(vec![es_experience()])))
        .expect(2)
        .mount(&mock_server)
        .await;

    let app = test_app(&mock_server.uri());

    let (status, _) = get_json(app.clone(), "/api/es/experiences/andes-trek").await;
    assert_eq!(status, StatusCode::OK);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/webhooks/cms")
                .method("POST")
                .header(header::AUTHORIZATION, "Bearer hook-secret")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({
                        "event": "entry.publish",
                        "model": "experience",
                        "entry": { "locale": "es" }
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["invalidated"], 1);

    // The evicted payload is fetched again on the next request
    let (status, _) = get_json(app, "/api/es/experiences/andes-trek").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_outage_serves_cached_default_locale_whole() {
    let mock_server = MockServer::start().await;
    mount_experience(&mock_server, "en", list_body(vec![en_experience()])).await;
    mount_experience(&mock_server, "es", list_body(vec![es_experience()])).await;

    let app = test_app(&mock_server.uri());

    // First request populates the es fallback cache (the en record has no
    // media, so the es rendition is fetched for the merge)
    let (status, _) = get_json(app.clone(), "/api/en/experiences/andes-trek").await;
    assert_eq!(status, StatusCode::OK);

    // CMS goes down
    mock_server.reset().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    // The cached es payload stands in for the requested locale
    let (status, body) = get_json(app, "/api/en/experiences/andes-trek").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["experience"]["locale"], "es");
    assert_eq!(body["experience"]["title"], "Trekking por los Andes");
}

#[tokio::test]
async fn test_unknown_slug_returns_404() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/experiences"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body(Vec::new())))
        .mount(&mock_server)
        .await;

    let app = test_app(&mock_server.uri());
    let (status, body) = get_json(app, "/api/en/experiences/no-such-trip").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not found");
}

#[tokio::test]
async fn test_untranslated_single_serves_default_locale() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/hero-section"))
        .and(query_param("locale", "de"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": null })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/hero-section"))
        .and(query_param("locale", "es"))
        .respond_with(ResponseTemplate::new(200).set_body_json(single_body(entry(
            "hero",
            json!({
                "locale": "es",
                "title": "Viajes que inspiran",
                "backgroundImage": { "url": "/uploads/hero.jpg" }
            }),
        ))))
        .mount(&mock_server)
        .await;

    let app = test_app(&mock_server.uri());
    let (status, body) = get_json(app, "/api/de/hero").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hero"]["title"], "Viajes que inspiran");
    assert_eq!(body["hero"]["locale"], "es");
}

#[tokio::test]
async fn test_single_outage_falls_back_to_placeholder() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let app = test_app(&mock_server.uri());

    let (status, body) = get_json(app.clone(), "/api/fr/hero").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hero"]["title"], "Des voyages qui vous marquent");
    assert_eq!(body["hero"]["cta_target"], "/fr/devis");

    let (status, body) = get_json(app, "/api/fr/texts").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["texts"]["locale"], "fr");
    assert!(body["texts"]["strings"]["error.generic"].is_string());
}

#[tokio::test]
async fn test_home_page_parts_fail_independently() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/hero-section"))
        .and(query_param("locale", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_json(single_body(entry(
            "hero",
            json!({
                "locale": "en",
                "title": "Journeys that stay with you",
                "backgroundImage": { "url": "/uploads/hero.jpg" },
                "backgroundVideo": { "url": "/uploads/hero.mp4" }
            }),
        ))))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/experiences"))
        .and(query_param("locale", "en"))
        .and(query_param("filters[featured][$eq]", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body(vec![
            entry("exp-1", json!({ "locale": "en", "slug": "a", "title": "A", "featured": true })),
            entry("exp-2", json!({ "locale": "en", "slug": "b", "title": "B", "featured": true })),
        ])))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/packages"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let app = test_app(&mock_server.uri());
    let (status, body) = get_json(app, "/api/en/home").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hero"]["title"], "Journeys that stay with you");
    assert_eq!(
        body["featured_experiences"].as_array().map(|a| a.len()),
        Some(2)
    );
    assert_eq!(
        body["featured_packages"].as_array().map(|a| a.len()),
        Some(0)
    );
}
