use rreq::config::ClientConfig;
use rreq::{CancellationToken, RequestBuilder};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

async fn redirecting_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/start"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/final"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/final"))
        .respond_with(ResponseTemplate::new(200).set_body_string("final"))
        .mount(&server)
        .await;
    server
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_redirects_are_client_policy() {
    if !can_bind_localhost() {
        return;
    }

    let server = redirecting_server().await;
    let client = ClientConfig {
        follow_redirects: true,
        ..ClientConfig::default()
    }
    .build_client()
    .expect("client should build");

    let body = RequestBuilder::new(&client, None)
        .url(format!("{}/start", server.uri()))
        .bytes(&CancellationToken::new())
        .await
        .expect("request should succeed");
    assert_eq!(&body[..], b"final");
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_redirect_not_followed_by_default() {
    if !can_bind_localhost() {
        return;
    }

    let server = redirecting_server().await;
    let client = ClientConfig::default()
        .build_client()
        .expect("client should build");

    let mut request = RequestBuilder::new(&client, None).url(format!("{}/start", server.uri()));
    let response = request
        .execute_raw(&CancellationToken::new())
        .await
        .expect("3xx is not an error status");
    assert_eq!(response.status(), 302);

    let requests = server.received_requests().await.expect("requests");
    assert_eq!(requests.len(), 1);
}
