use rreq::{CancellationToken, RequestBuilder};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

async fn execute_with(
    server: &MockServer,
    expected: &str,
    configure: impl FnOnce(RequestBuilder) -> RequestBuilder,
) {
    Mock::given(method(expected))
        .and(path("/resource"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(server)
        .await;

    let client = reqwest::Client::new();
    let request = RequestBuilder::new(&client, None).url(format!("{}/resource", server.uri()));
    let mut request = configure(request);
    let response = request
        .execute_raw(&CancellationToken::new())
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), 200);
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_get_request() {
    if !can_bind_localhost() {
        return;
    }
    let server = MockServer::start().await;
    execute_with(&server, "GET", |r| r).await;
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_post_request() {
    if !can_bind_localhost() {
        return;
    }
    let server = MockServer::start().await;
    execute_with(&server, "POST", RequestBuilder::post).await;
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_put_request() {
    if !can_bind_localhost() {
        return;
    }
    let server = MockServer::start().await;
    execute_with(&server, "PUT", RequestBuilder::put).await;
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_delete_request() {
    if !can_bind_localhost() {
        return;
    }
    let server = MockServer::start().await;
    execute_with(&server, "DELETE", |r| r.method("DELETE")).await;
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_custom_verb() {
    if !can_bind_localhost() {
        return;
    }
    let server = MockServer::start().await;
    execute_with(&server, "PURGE", |r| r.method("PURGE")).await;
}
