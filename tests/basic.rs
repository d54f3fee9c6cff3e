use rreq::{CancellationToken, RequestBuilder, RreqError};

#[test]
fn test_version() {
    assert!(!rreq::VERSION.is_empty());
}

#[tokio::test]
async fn test_missing_url_fails_before_dispatch() {
    let client = reqwest::Client::new();
    let mut request = RequestBuilder::new(&client, None);
    let err = request
        .bytes(&CancellationToken::new())
        .await
        .expect_err("no url configured");
    assert!(matches!(err, RreqError::InvalidRequest(_)));
}
