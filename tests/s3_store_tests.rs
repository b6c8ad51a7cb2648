use mockito::Matcher;
use pii_obfuscator::config::S3Config;
use pii_obfuscator::s3::S3Store;
use pii_obfuscator::store::{ObjectStore, StoreError};

fn store_for(server: &mockito::ServerGuard, with_creds: bool) -> S3Store {
    S3Store::new(S3Config {
        region: "us-east-1".into(),
        access_key_id: with_creds.then(|| "AKIDEXAMPLE".to_string()),
        secret_access_key: with_creds.then(|| "wJalrXUtnFEMI".to_string()),
        session_token: None,
        endpoint: Some(server.url()),
    })
}

#[tokio::test]
async fn get_object_returns_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/my-bucket/data.csv")
        .with_status(200)
        .with_body("name,age\nAlice,30\n")
        .create_async()
        .await;

    let store = store_for(&server, false);
    let bytes = store.get_object("my-bucket", "data.csv").await.unwrap();
    assert_eq!(&bytes[..], b"name,age\nAlice,30\n");
    mock.assert_async().await;
}

#[tokio::test]
async fn signed_requests_carry_sigv4_headers() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/my-bucket/data.csv")
        .match_header(
            "authorization",
            Matcher::Regex(
                "^AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/\\d{8}/us-east-1/s3/aws4_request".into(),
            ),
        )
        .match_header("x-amz-date", Matcher::Regex("^\\d{8}T\\d{6}Z$".into()))
        .match_header("x-amz-content-sha256", Matcher::Any)
        .with_status(200)
        .with_body("ok")
        .create_async()
        .await;

    let store = store_for(&server, true);
    store.get_object("my-bucket", "data.csv").await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn missing_object_is_not_found() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/my-bucket/missing.csv")
        .with_status(404)
        .create_async()
        .await;

    let store = store_for(&server, false);
    let err = store.get_object("my-bucket", "missing.csv").await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
}

#[tokio::test]
async fn denied_object_is_forbidden() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/my-bucket/secret.csv")
        .with_status(403)
        .create_async()
        .await;

    let store = store_for(&server, false);
    let err = store.get_object("my-bucket", "secret.csv").await.unwrap_err();
    assert!(matches!(err, StoreError::Forbidden { .. }));
}

#[tokio::test]
async fn server_error_is_unexpected_status() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/my-bucket/data.csv")
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let store = store_for(&server, false);
    let err = store.get_object("my-bucket", "data.csv").await.unwrap_err();
    match err {
        StoreError::UnexpectedStatus { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected UnexpectedStatus, got: {other}"),
    }
}

#[tokio::test]
async fn put_object_sends_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PUT", "/my-bucket/out.csv")
        .match_body("name,age\n***,30\n")
        .with_status(200)
        .create_async()
        .await;

    let store = store_for(&server, false);
    store
        .put_object("my-bucket", "out.csv", "name,age\n***,30\n".into())
        .await
        .unwrap();
    mock.assert_async().await;
}
