//! End-to-end tests against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives `ReviewsClient`
//! over real HTTP through `UreqTransport`. Checks that headers, endpoints
//! and error translation line up with an actual axum server.

use std::net::SocketAddr;

use revas_core::{
    CallFailure, Credentials, Endpoints, HttpMethod, HttpRequest, ReviewsClient, Transport,
    UreqTransport,
};
use serde_json::{json, Value};

const TOKEN: &str = "integration-token";

fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, TOKEN).await
        })
        .unwrap();
    });

    addr
}

fn client(addr: SocketAddr, token: &str) -> ReviewsClient<UreqTransport> {
    ReviewsClient::new(
        Credentials::new(token),
        Endpoints::with_base_url(&format!("http://{addr}/api/v1")),
        UreqTransport::new(),
    )
}

#[test]
fn review_request_lifecycle() {
    let addr = start_server();
    let client = client(addr, TOKEN);

    // Step 1: certifications come back exactly as served.
    let certifications = client.certifications().unwrap();
    assert_eq!(certifications, mock_server::certifications_fixture());

    // Step 2: only certified projects survive the filter.
    let ids = client.certified_project_ids().unwrap();
    assert_eq!(ids, vec![145, 14]);

    // Step 3: languages from the reviewer profile.
    let languages = client.certified_language_codes().unwrap();
    assert_eq!(languages, vec!["en-us", "zh-cn", "pt-br"]);

    // Step 4: nothing assigned yet, no open requests.
    assert_eq!(
        client.assigned_count().unwrap(),
        json!({ "assigned_count": 0 })
    );
    assert_eq!(client.submission_requests().unwrap(), json!([]));

    // Step 5: request reviews for every certified project/language pair.
    let selection = client.projects_with_languages(&ids).unwrap();
    assert_eq!(selection.projects.len(), 6);
    let payload = selection.to_value().unwrap();
    let ack = client.request_reviews(&payload).unwrap();
    assert_eq!(ack["status"], "available");
    assert_eq!(ack["projects"], payload["projects"]);

    // Step 6: the new request is listed.
    let requests = client.submission_requests().unwrap();
    let requests = requests.as_array().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["id"], ack["id"]);
}

#[test]
fn stale_token_is_unauthorized_everywhere() {
    let addr = start_server();
    let client = client(addr, "stale-token");

    let results: Vec<Result<Value, _>> = vec![
        client.certifications(),
        client.certified_languages(),
        client.assigned_count(),
        client.submission_requests(),
        client.request_reviews(&json!({ "projects": [{ "project_id": 1, "language": "en-us" }] })),
    ];
    for result in results {
        let err = result.unwrap_err();
        assert!(matches!(
            err.cause(),
            CallFailure::Status { status: 401, .. }
        ));
    }
}

#[test]
fn unknown_endpoint_is_unauthorized() {
    let addr = start_server();
    let mut endpoints = Endpoints::with_base_url(&format!("http://{addr}/api/v1"));
    endpoints.certifications = format!("http://{addr}/api/v1/missing.json");
    let client = ReviewsClient::new(Credentials::new(TOKEN), endpoints, UreqTransport::new());

    let err = client.certifications().unwrap_err();
    assert!(matches!(err.cause(), CallFailure::Status { status: 404, .. }));
}

#[test]
fn connection_failure_is_unauthorized() {
    // Bind then drop to get a port nothing listens on.
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let client = client(addr, TOKEN);

    let err = client.assigned_count().unwrap_err();
    assert!(matches!(err.cause(), CallFailure::Transport(_)));
}

#[test]
fn transport_returns_error_statuses_as_data() {
    let addr = start_server();
    let transport = UreqTransport::new();

    let response = transport
        .send(HttpRequest {
            method: HttpMethod::Get,
            url: format!("http://{addr}/api/v1/me.json"),
            headers: Vec::new(),
            body: None,
        })
        .unwrap();
    assert_eq!(response.status, 401);
    let body: Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(body["error"], "unauthorized");
}
