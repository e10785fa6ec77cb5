//! Shared utilities for integration tests.

use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{Request, Response},
};
use nlb_compat::config::NlbConfig;
use nlb_compat::HttpServer;
use tokio::net::TcpListener;
use tower::ServiceExt;

/// Address the load balancer connects from in the router tests.
pub const PEER: &str = "10.0.0.2:51234";

/// Build a request as it would arrive from the load balancer at [`PEER`].
#[allow(dead_code)]
pub fn lb_request(uri: &str, headers: &[(&str, &str)]) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let mut request = builder.body(Body::empty()).unwrap();
    let peer: SocketAddr = PEER.parse().unwrap();
    request.extensions_mut().insert(ConnectInfo(peer));
    request
}

/// Drive a single request through a freshly built server router.
#[allow(dead_code)]
pub async fn send(config: NlbConfig, request: Request<Body>) -> Response<Body> {
    HttpServer::new(config).router().oneshot(request).await.unwrap()
}

#[allow(dead_code)]
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

/// Start a real server on an ephemeral port and return its address.
#[allow(dead_code)]
pub async fn start_server(config: NlbConfig) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config);

    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });

    addr
}
