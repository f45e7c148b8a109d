//! Integration tests for the API client against a mock server.
//!
//! These verify the wire contract end to end: query-string shapes, the
//! multipart upload layout, and how error bodies surface to callers.

use coursefiles_core::api::{ApiClient, ApiError, UploadFile};
use coursefiles_core::model::{
    InsertLinkRequest, InsertResourceRequest, ResourceType, Semester,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn insert_request(course_id: &str) -> InsertResourceRequest {
    InsertResourceRequest {
        title: "Midterm 2023".to_string(),
        subtitle: Some("with solutions".to_string()),
        course_id: course_id.to_string(),
        resource_type: ResourceType::PastExam,
        semester: Semester::Fall,
        academic_year: 2023,
        issolved: false,
    }
}

fn upload_file(name: &str, content: &[u8]) -> UploadFile {
    UploadFile {
        name: name.to_string(),
        bytes: content.to_vec(),
    }
}

/// Counts multipart parts with the given field name in a raw request body.
fn count_parts(body: &[u8], field: &str) -> usize {
    let needle = format!("name=\"{field}\"");
    String::from_utf8_lossy(body).matches(&needle).count()
}

#[tokio::test]
async fn test_list_request_hits_expected_url_shape() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/courses"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"courses":[],"total_courses":0}"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::from_base(&server.uri()).unwrap();
    client.list_courses(2, "algo", Some(3)).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let query = requests[0].url.query().unwrap();
    assert_eq!(query, "page=2&search=algo&faculty=3");
}

#[tokio::test]
async fn test_unfiltered_list_request_omits_faculty_param() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/courses"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"courses":[],"total_courses":0}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let client = ApiClient::from_base(&server.uri()).unwrap();
    client.list_courses(1, "algo", None).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query().unwrap(), "page=1&search=algo");
}

#[tokio::test]
async fn test_details_request_carries_resource_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/course_details/CS116"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"metadata":{"course_id":"CS116","course_name":"Computing","course_faculty":6},"resources":[],"links":[]}"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::from_base(&server.uri()).unwrap();
    let details = client
        .course_details("CS116", ResourceType::PastExam)
        .await
        .unwrap();
    assert_eq!(details.metadata.course_id, "CS116");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query().unwrap(), "resource_type=1");
}

#[tokio::test]
async fn test_insert_resource_sends_one_metadata_and_n_file_parts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/insert_course/CS116"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"ok\":true}"))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::from_base(&server.uri()).unwrap();
    let files = [
        upload_file("questions.pdf", b"q"),
        upload_file("answers.pdf", b"a"),
        upload_file("scheme.pdf", b"s"),
    ];
    client
        .insert_resource("CS116", &insert_request("CS116"), &files)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1, "exactly one multipart POST");
    let body = &requests[0].body;
    assert_eq!(count_parts(body, "metadata"), 1);
    assert_eq!(count_parts(body, "files"), 3);

    // The metadata part is the JSON-encoded request.
    let text = String::from_utf8_lossy(body);
    assert!(text.contains("\"resource_type\":1"), "metadata JSON in body");
    assert!(text.contains("\"issolved\":false"));
    assert!(text.contains("questions.pdf"));
}

#[tokio::test]
async fn test_insert_resource_with_no_files_still_sends_metadata() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/insert_course/CS116"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::from_base(&server.uri()).unwrap();
    client
        .insert_resource("CS116", &insert_request("CS116"), &[])
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body = &requests[0].body;
    assert_eq!(count_parts(body, "metadata"), 1);
    assert_eq!(count_parts(body, "files"), 0);
}

#[tokio::test]
async fn test_insert_link_posts_exactly_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/insert_course_link/CS116"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::from_base(&server.uri()).unwrap();
    let request = InsertLinkRequest {
        title: "Recorded lectures".to_string(),
        url: "https://video.example/list".to_string(),
    };
    client.insert_link("CS116", &request).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["title"], "Recorded lectures");
    assert_eq!(body["url"], "https://video.example/list");
}

#[tokio::test]
async fn test_server_rejection_surfaces_raw_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/insert_course_link/CS116"))
        .respond_with(
            ResponseTemplate::new(409).set_body_string("a link with this title already exists"),
        )
        .mount(&server)
        .await;

    let client = ApiClient::from_base(&server.uri()).unwrap();
    let request = InsertLinkRequest {
        title: "Recorded lectures".to_string(),
        url: "https://video.example/list".to_string(),
    };
    let err = client.insert_link("CS116", &request).await.unwrap_err();
    match err {
        ApiError::Rejected { status, body, url } => {
            assert_eq!(status, 409);
            assert_eq!(body, "a link with this title already exists");
            assert!(url.contains("/insert_course_link/CS116"));
        }
        other => panic!("expected Rejected, got: {other:?}"),
    }
}
