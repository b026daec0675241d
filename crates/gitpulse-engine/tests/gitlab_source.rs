//! HTTP-level tests for `GitLabSource` against a wiremock server: token
//! header, pagination headers, the full-page fallback heuristic, and
//! fatal-versus-degraded failure paths.

use gitpulse_engine::source::gitlab::GitLabSource;
use gitpulse_engine::{aggregate, EventSource, RunError, SourceError};
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "glpat-secret";
const FROM: &str = "2024-03-01";
const TO: &str = "2024-03-31";

fn source(server: &MockServer) -> GitLabSource {
    GitLabSource::new(&server.uri(), TOKEN, FROM, TO).unwrap()
}

fn events_body(start_id: u64, count: usize, project_id: u64) -> Value {
    let events: Vec<Value> = (0..count as u64)
        .map(|i| {
            json!({
                "id": start_id + i,
                "project_id": project_id,
                "action_name": "pushed",
                "target_type": null,
                "created_at": "2024-03-10T08:00:00Z"
            })
        })
        .collect();
    Value::Array(events)
}

async fn mount_user(server: &MockServer, user_id: u64) {
    Mock::given(method("GET"))
        .and(path("/api/v4/user"))
        .and(header("PRIVATE-TOKEN", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": user_id })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn who_am_i_sends_the_private_token_header() {
    let server = MockServer::start().await;
    mount_user(&server, 7).await;

    let user_id = source(&server).current_user_id().await.unwrap();

    assert_eq!(user_id, 7);
}

#[tokio::test]
async fn rejected_credential_surfaces_as_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/user"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = source(&server).current_user_id().await.unwrap_err();

    assert!(matches!(err, SourceError::Auth(_)));
    assert!(err.to_string().contains("invalid credential or unreachable host"));
}

#[tokio::test]
async fn pagination_headers_decide_has_more() {
    let server = MockServer::start().await;
    mount_user(&server, 7).await;
    Mock::given(method("GET"))
        .and(path("/api/v4/users/7/events"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "100"))
        .and(query_param("after", FROM))
        .and(query_param("before", TO))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-page", "1")
                .insert_header("x-total-pages", "2")
                .set_body_json(events_body(1, 2, 10)),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v4/users/7/events"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-page", "2")
                .insert_header("x-total-pages", "2")
                .set_body_json(events_body(3, 1, 10)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let gitlab = source(&server);
    let first = gitlab.events_page(7, 1).await.unwrap();
    assert_eq!(first.events.len(), 2);
    assert!(first.has_more);

    let second = gitlab.events_page(7, 2).await.unwrap();
    assert_eq!(second.events.len(), 1);
    assert!(!second.has_more);
}

#[tokio::test]
async fn headerless_full_pages_cost_exactly_one_trailing_request() {
    let server = MockServer::start().await;
    mount_user(&server, 7).await;
    for page_no in 1..=3u64 {
        Mock::given(method("GET"))
            .and(path("/api/v4/users/7/events"))
            .and(query_param("page", page_no.to_string()))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(events_body((page_no - 1) * 100 + 1, 100, 10)),
            )
            .expect(1)
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/api/v4/users/7/events"))
        .and(query_param("page", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(events_body(0, 0, 10)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v4/projects/10"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "name": "App", "path_with_namespace": "team/app" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let projects = aggregate(&source(&server)).await.unwrap();

    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].events.len(), 300);
    assert_eq!(projects[0].project_name, "App");
    // expect(1) on each page mock makes the server itself verify that
    // exactly four event requests were issued.
}

#[tokio::test]
async fn page_failure_aborts_with_the_status_text() {
    let server = MockServer::start().await;
    mount_user(&server, 7).await;
    Mock::given(method("GET"))
        .and(path("/api/v4/users/7/events"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(events_body(1, 100, 10)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v4/users/7/events"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = aggregate(&source(&server)).await.unwrap_err();

    assert!(matches!(err, RunError::Source(SourceError::Http(_))));
    assert!(err.to_string().contains("fetching events failed"));
}

#[tokio::test]
async fn forbidden_project_metadata_degrades_instead_of_aborting() {
    let server = MockServer::start().await;
    mount_user(&server, 7).await;
    Mock::given(method("GET"))
        .and(path("/api/v4/users/7/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(events_body(1, 2, 42)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v4/projects/42"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;

    let projects = aggregate(&source(&server)).await.unwrap();

    assert_eq!(projects[0].project_name, "Project 42");
    assert_eq!(projects[0].project_path, "42");
    assert_eq!(projects[0].events.len(), 2);
}

#[tokio::test]
async fn project_path_falls_back_to_id_when_namespace_is_absent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/projects/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": "Solo" })))
        .mount(&server)
        .await;

    let meta = source(&server).project(9).await.unwrap();

    assert_eq!(meta.name, "Solo");
    assert_eq!(meta.path, "9");
}
