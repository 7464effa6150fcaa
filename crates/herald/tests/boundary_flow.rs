//! End-to-end handler flows across the Herald crates.

use bytes::Bytes;
use herald::core::messages;
use herald::prelude::*;
use http::{header, HeaderMap, HeaderValue, Method, Request, Response, StatusCode, Uri};
use http_body_util::Full;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct CreateMovie {
    title: String,
    year: i32,
    #[serde(default)]
    genres: Vec<String>,
}

fn body_json(response: &Response<Bytes>) -> Value {
    serde_json::from_slice(response.body()).unwrap()
}

fn create_movie(ctx: &ExtractionContext, limit: usize) -> ApiResult<Response<Bytes>> {
    let input: CreateMovie = read_json_with_limit(ctx, limit)?;

    let mut v = Validator::new();
    v.check(!input.title.is_empty(), "title", "must be provided");
    v.check(input.year >= 1888, "year", "must be greater than 1888");
    v.check(!input.genres.is_empty(), "genres", "must contain at least 1 genre");
    v.check(herald::core::unique(&input.genres), "genres", "must not contain duplicate values");
    if !v.valid() {
        return Err(ApiError::failed_validation(v.into_errors()));
    }

    let mut headers = HeaderMap::new();
    headers.insert(header::LOCATION, HeaderValue::from_static("/v1/movies/1"));

    let env = Envelope::new().with("movie", json!({"id": 1, "title": input.title, "year": input.year}));
    write_json(StatusCode::CREATED, &env, Some(&headers)).map_err(ApiError::internal)
}

fn list_movies(ctx: &ExtractionContext) -> ApiResult<Response<Bytes>> {
    let qs = QueryParams::from_context(ctx);
    let mut v = Validator::new();

    let title = read_string(&qs, "title", "");
    let genres = read_csv(&qs, "genres", Vec::new());
    let page = read_int(&qs, "page", 1, &mut v);
    let page_size = read_int(&qs, "page_size", 20, &mut v);
    let sort = read_string(&qs, "sort", "id");

    v.check(page > 0, "page", "must be greater than zero");
    v.check(page_size <= 100, "page_size", "must be a maximum of 100");
    v.check(
        herald::core::permitted_value(&sort.as_str(), &["id", "title", "-id", "-title"]),
        "sort",
        "invalid sort value",
    );
    if !v.valid() {
        return Err(ApiError::failed_validation(v.into_errors()));
    }

    let env = Envelope::new()
        .with("title", title)
        .with("genres", genres)
        .with("metadata", json!({"current_page": page, "page_size": page_size}));
    write_json(StatusCode::OK, &env, None).map_err(ApiError::internal)
}

fn show_movie(ctx: &ExtractionContext) -> ApiResult<Response<Bytes>> {
    let id = read_id_param(ctx.path_params())?;
    if id != 1 {
        return Err(ApiError::NotFound);
    }

    let env = Envelope::new().with("movie", json!({"id": id, "title": "Metropolis"}));
    write_json(StatusCode::OK, &env, None).map_err(ApiError::internal)
}

fn require_activated_user(ctx: &ExtractionContext) -> ApiResult<Response<Bytes>> {
    let principal = retrieve(ctx);
    if principal.is_anonymous() {
        return Err(ApiError::AuthenticationRequired);
    }
    if !principal.is_activated() {
        return Err(ApiError::InactiveAccount);
    }

    let env = Envelope::new().with("user", principal.log_id());
    write_json(StatusCode::OK, &env, None).map_err(ApiError::internal)
}

fn serve(
    ctx: &ExtractionContext,
    handler: impl FnOnce(&ExtractionContext) -> ApiResult<Response<Bytes>>,
) -> Response<Bytes> {
    handler(ctx).unwrap_or_else(|err| ErrorResponder::for_context(ctx).respond(&err))
}

fn post(body: &'static str) -> ExtractionContext {
    ExtractionContext::builder()
        .method(Method::POST)
        .uri(Uri::from_static("/v1/movies"))
        .header("content-type", "application/json")
        .body(body)
        .build()
}

#[test]
fn test_create_movie_success() {
    let ctx = post(r#"{"title": "Metropolis", "year": 1927, "genres": ["sci-fi"]}"#);
    let response = serve(&ctx, |ctx| create_movie(ctx, 1_048_576));

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.headers()[header::LOCATION], "/v1/movies/1");
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    assert!(response.body().ends_with(b"}\n"));
    assert_eq!(body_json(&response)["movie"]["title"], "Metropolis");
}

#[test]
fn test_create_movie_bad_bodies() {
    let cases = [
        ("", "body must not be empty"),
        (r#"{"title": 123, "year": 1927}"#, "body contains incorrect JSON type for field \"title\""),
        (r#"{"title": "A", "year": 1927}{"title": "B"}"#, "body must only contain a single JSON value"),
        (r#"{"title": "A", "year": 1927, "rating": "PG"}"#, "body contains unknown key \"rating\""),
        (r#"{"title": "A", "year": "#, "body contains badly-formed JSON"),
        (r#"{"rating": "PG", "title": "A""#, "body contains badly-formed JSON"),
        (r#"{"title": "A"}"#, "body is missing required field \"year\""),
    ];

    for (body, message) in cases {
        let ctx = post(body);
        let response = serve(&ctx, |ctx| create_movie(ctx, 1_048_576));

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(body_json(&response), json!({"error": message}), "{body}");
    }
}

#[test]
fn test_create_movie_respects_configured_limit() {
    let config = ConfigLoader::new()
        .with_string("[limits]\nmax_body_bytes = 16", "toml")
        .unwrap()
        .load()
        .unwrap();

    let ctx = post(r#"{"title": "Metropolis", "year": 1927}"#);
    let response = serve(&ctx, |ctx| create_movie(ctx, config.limits.max_body_bytes));

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(&response)["error"],
        "body must not be larger than 16 bytes"
    );
}

#[test]
fn test_create_movie_validation_failure() {
    let ctx = post(r#"{"title": "", "year": 1500, "genres": ["drama", "drama"]}"#);
    let response = serve(&ctx, |ctx| create_movie(ctx, 1_048_576));

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body_json(&response),
        json!({"error": {
            "title": "must be provided",
            "year": "must be greater than 1888",
            "genres": "must not contain duplicate values",
        }})
    );
}

#[test]
fn test_list_movies_reports_every_bad_parameter() {
    let ctx = ExtractionContext::builder()
        .uri(Uri::from_static("/v1/movies?page=abc&page_size=x&sort=runtime"))
        .build();
    let response = serve(&ctx, list_movies);

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body_json(&response),
        json!({"error": {
            "page": "must be an integer value",
            "page_size": "must be an integer value",
            "sort": "invalid sort value",
        }})
    );
}

#[test]
fn test_list_movies_success() {
    let ctx = ExtractionContext::builder()
        .uri(Uri::from_static("/v1/movies?title=moana&genres=animation,adventure&page=3"))
        .build();
    let response = serve(&ctx, list_movies);

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(&response);
    assert_eq!(body["title"], "moana");
    assert_eq!(body["genres"], json!(["animation", "adventure"]));
    assert_eq!(body["metadata"], json!({"current_page": 3, "page_size": 20}));
}

#[test]
fn test_show_movie() {
    let ok = ExtractionContext::builder().path_param("id", "1").build();
    assert_eq!(serve(&ok, show_movie).status(), StatusCode::OK);

    let missing = ExtractionContext::builder().path_param("id", "2").build();
    let response = serve(&missing, show_movie);
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(&response)["error"], messages::NOT_FOUND);

    let bad = ExtractionContext::builder().path_param("id", "-1").build();
    let response = serve(&bad, show_movie);
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(&response)["error"], "invalid id parameter");
}

#[test]
fn test_principal_flow() {
    let build = |principal: Principal| {
        let request = Request::builder()
            .uri("/v1/users/me")
            .body(Bytes::new())
            .unwrap();
        let request = attach(request, principal);
        ExtractionContext::from_request(request, Params::new())
    };

    let ctx = build(Principal::anonymous());
    let response = serve(&ctx, require_activated_user);
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(&response)["error"], messages::AUTHENTICATION_REQUIRED);

    let ctx = build(Principal::user(7, "Ada", "ada@example.com", false));
    let response = serve(&ctx, require_activated_user);
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(&response)["error"], messages::INACTIVE_ACCOUNT);

    let ctx = build(Principal::user(7, "Ada", "ada@example.com", true));
    let response = serve(&ctx, require_activated_user);
    assert_eq!(response.status(), StatusCode::OK);
}

#[test]
#[should_panic(expected = "missing principal value in request context")]
fn test_handler_without_authentication_panics() {
    let ctx = ExtractionContext::builder().build();
    let _ = serve(&ctx, require_activated_user);
}

#[test]
fn test_server_fault_hides_detail() {
    let ctx = ExtractionContext::builder()
        .uri(Uri::from_static("/v1/movies/1"))
        .build();
    let response = serve(&ctx, |_| {
        Err(anyhow::anyhow!("pq: connection refused").into())
    });

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(&response), json!({"error": messages::INTERNAL}));
}

#[tokio::test]
async fn test_streamed_body_then_decode() {
    let body = Full::new(Bytes::from_static(br#"{"title": "Up", "year": 2009, "genres": ["animation"]}"#));
    let bytes = read_body(body, 1_048_576).await.unwrap();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/v1/movies")
        .body(bytes)
        .unwrap();
    let ctx = ExtractionContext::from_request(request, Params::new());

    let response = serve(&ctx, |ctx| create_movie(ctx, 1_048_576));
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_post_response_work_survives_panics_and_drains_on_shutdown() {
    let config = HeraldConfig::default();
    let supervisor = Supervisor::new();
    let delivered = Arc::new(AtomicUsize::new(0));

    for user_id in 0..8_u64 {
        let delivered = Arc::clone(&delivered);
        supervisor.launch(format!("welcome-email-{user_id}"), async move {
            tokio::time::sleep(Duration::from_millis(user_id * 3)).await;
            if user_id % 4 == 0 {
                panic!("smtp: connection reset for user {user_id}");
            }
            delivered.fetch_add(1, Ordering::SeqCst);
        });
    }

    assert!(supervisor.shutdown(config.shutdown_timeout()).await);
    assert_eq!(supervisor.outstanding(), 0);
    assert_eq!(delivered.load(Ordering::SeqCst), 6);
    assert_eq!(supervisor.stats().panicked(), 2);
}
