use greenbook_client::{ApiClient, ApiConfig};
use greenbook_core::GreenbookError;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(ApiConfig::single_base(server.uri()))
}

#[tokio::test]
async fn login_decodes_flat_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(json!({"username": "alice", "password": "pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "access_token": "t1",
            "token_type": "bearer",
            "userID": "u1",
            "username": "alice"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let login = client.login("alice", "pw").await.unwrap();
    assert_eq!(login.user_id, "u1");
    assert_eq!(login.access_token, "t1");
}

#[tokio::test]
async fn non_2xx_carries_backend_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "bad credentials"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    match client.login("alice", "wrong").await {
        Err(GreenbookError::Http { status, detail }) => {
            assert_eq!(status, 401);
            assert_eq!(detail, "bad credentials");
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn business_rejection_inside_2xx() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/report/add_chapter"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "error",
            "detail": "chapter already exists"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    match client.add_chapter("a-1", "Governance").await {
        Err(GreenbookError::Rejected(message)) => {
            assert_eq!(message, "chapter already exists");
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn success_with_mismatched_shape_fails_closed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/organizations/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": "not an object"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(matches!(
        client.organization_info("org-1").await,
        Err(GreenbookError::Decode(_))
    ));
}

#[tokio::test]
async fn bearer_token_is_attached_when_set() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/user/profile/Personal_Information"))
        .and(header("authorization", "Bearer t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": {"userName": "Alice"}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.set_bearer_token(Some("t1".into()));
    let profile = client.fetch_user_profile("u1").await.unwrap();
    assert_eq!(profile.username.as_deref(), Some("Alice"));
}

#[tokio::test]
async fn review_history_uses_divergent_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/report/get_review_history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status_code": 200,
            "content": {"data": [{"reviewer": "bob", "decision": "Approved"}]}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let history = client.review_history("b-1").await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["reviewer"], "bob");
}

#[tokio::test]
async fn asset_content_decodes_section_forest() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/organizations/get_asset_content"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": {
                "sections": [
                    {
                        "id": "s1",
                        "title": "Governance",
                        "children": [
                            {
                                "id": "c1",
                                "title": "Board",
                                "children": [
                                    {"id": "l1", "title": "Composition", "BlockID": "b1"}
                                ]
                            }
                        ]
                    }
                ],
                "isLocked": true,
                "lockedBy": "u2"
            }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let asset = client.asset_content("org-1", "a-1").await.unwrap();
    assert!(asset.is_locked);
    assert_eq!(asset.locked_by.as_deref(), Some("u2"));
    assert!(asset.sections.is_leaf_section("l1"));
    assert_eq!(
        asset.sections.find_section_by_id("l1").unwrap().block_id.as_deref(),
        Some("b1")
    );
}
