//! Integration tests for DocClient against a local mock gateway.

use llmcenter_client::auth::{StaticToken, TokenProvider};
use llmcenter_client::types::{MessageRole, UpdateRequest};
use llmcenter_client::{DocClient, Error};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("llmcenter_client=debug")),
        )
        .try_init();
}

fn client_for(server: &mockito::ServerGuard) -> DocClient {
    DocClient::builder()
        .base_url(&server.url())
        .unwrap()
        .token_provider(StaticToken::new("test-token"))
        .build()
        .unwrap()
}

struct NoToken;

impl TokenProvider for NoToken {
    fn token(&self) -> Option<String> {
        None
    }
}

#[tokio::test]
async fn list_conversations_unwraps_paged_envelope() {
    init_tracing();
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/conversations")
        .match_header("authorization", "Bearer test-token")
        .with_status(200)
        .with_body(
            r#"{"code":0,"msg":"ok","data":{"data":[
                {"conversation_id":"c1","title":"Quarterly report","updated_at":"2024-05-01T10:00:00Z"},
                {"conversation_id":"c2","title":"Press release","updated_at":"2024-05-02T09:00:00Z"}
            ]}}"#,
        )
        .create_async()
        .await;

    let list = client_for(&server).list_conversations().await.unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].conversation_id, "c1");
    assert_eq!(list[1].title, "Press release");
    mock.assert_async().await;
}

#[tokio::test]
async fn conversation_detail_parses_history_roles() {
    init_tracing();
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/conversations/c1")
        .with_status(200)
        .with_body(
            r##"{"code":0,"msg":"","data":{"conversation_id":"c1","title":"t","history":[
                {"id":"m1","role":"user","content":"draft it","content_type":"text","created_at":"2024-05-01T10:00:00Z"},
                {"id":"m2","role":"assistant","content":"# Draft","content_type":"final_document","created_at":"2024-05-01T10:01:00Z"}
            ]}}"##,
        )
        .create_async()
        .await;

    let detail = client_for(&server).conversation_detail("c1").await.unwrap();
    assert_eq!(detail.history.len(), 2);
    assert_eq!(detail.history[0].role, MessageRole::User);
    assert_eq!(detail.history[1].role, MessageRole::Assistant);
}

#[tokio::test]
async fn final_document_missing_documents_is_an_error() {
    init_tracing();
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/documents/c1")
        .with_status(200)
        .with_body(r#"{"conversation_id":"c1","documents":null}"#)
        .create_async()
        .await;

    let err = client_for(&server).final_document("c1").await.unwrap_err();
    assert!(matches!(err, Error::DocumentMissing));
}

#[tokio::test]
async fn update_document_requires_success_flag() {
    init_tracing();
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/update")
        .with_status(200)
        .with_body(r#"{"success":false}"#)
        .create_async()
        .await;

    let request = UpdateRequest {
        conversation_id: "c1".to_string(),
        message_id: "m1".to_string(),
        prompt: "full document text".to_string(),
    };
    let err = client_for(&server)
        .update_document(&request)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Api { .. }));
}

#[tokio::test]
async fn missing_token_fails_before_any_request() {
    init_tracing();
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/conversations")
        .expect(0)
        .create_async()
        .await;

    let client = DocClient::builder()
        .base_url(&server.url())
        .unwrap()
        .token_provider(NoToken)
        .build()
        .unwrap();

    let err = client.list_conversations().await.unwrap_err();
    assert!(matches!(err, Error::Auth));
    mock.assert_async().await;
}

#[tokio::test]
async fn non_success_status_carries_raw_error_body() {
    init_tracing();
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/historydatas/c1")
        .with_status(503)
        .with_body("backend unavailable")
        .create_async()
        .await;

    let err = client_for(&server).history_data("c1").await.unwrap_err();
    match err {
        Error::Transport { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "backend unavailable");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn history_data_parses_intake_record() {
    init_tracing();
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/historydatas/c1")
        .with_status(200)
        .with_body(
            r#"{"conversation_id":"c1","items":[{
                "id":"h1","documenttype":"proposal","information":"background notes",
                "requests":"formal tone","created_at":"2024-05-01T10:00:00Z",
                "references":[{"file_id":"f1","filename":"notes.docx"}]
            }]}"#,
        )
        .create_async()
        .await;

    let history = client_for(&server).history_data("c1").await.unwrap();
    assert_eq!(history.items.len(), 1);
    assert_eq!(history.items[0].documenttype, "proposal");
    assert_eq!(history.items[0].references[0].filename, "notes.docx");
}

#[tokio::test]
async fn update_document_accepts_success() {
    init_tracing();
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/update")
        .with_status(200)
        .with_body(r#"{"success":true}"#)
        .create_async()
        .await;

    let request = UpdateRequest {
        conversation_id: "c1".to_string(),
        message_id: "m1".to_string(),
        prompt: "full document text".to_string(),
    };
    client_for(&server).update_document(&request).await.unwrap();
}

#[tokio::test]
async fn login_unwraps_token_grant() {
    init_tracing();
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/user/login")
        .with_status(200)
        .with_body(
            r#"{"code":0,"msg":"","data":{"accessToken":"tok-1","accessExpire":7200,"refreshAfter":3600}}"#,
        )
        .create_async()
        .await;

    let config = llmcenter_client::ClientConfig::new(&server.url(), &server.url()).unwrap();
    let auth = llmcenter_client::auth::AuthClient::new(config).unwrap();
    let tokens = auth
        .login(&llmcenter_client::auth::Credentials {
            mobile: "13800000000".to_string(),
            password: "hunter2".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(tokens.access_token, "tok-1");
    assert_eq!(tokens.access_expire, 7200);
}

#[tokio::test]
async fn login_rejection_surfaces_envelope_message() {
    init_tracing();
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/user/register")
        .with_status(200)
        .with_body(r#"{"code":1001,"msg":"mobile already registered"}"#)
        .create_async()
        .await;

    let config = llmcenter_client::ClientConfig::new(&server.url(), &server.url()).unwrap();
    let auth = llmcenter_client::auth::AuthClient::new(config).unwrap();
    let err = auth
        .register(&llmcenter_client::auth::Credentials {
            mobile: "13800000000".to_string(),
            password: "hunter2".to_string(),
        })
        .await
        .unwrap_err();

    match err {
        Error::Api { code, msg } => {
            assert_eq!(code, 1001);
            assert_eq!(msg, "mobile already registered");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
