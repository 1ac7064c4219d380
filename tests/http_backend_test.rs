use kafe_client::api::{ApiError, Backend, HttpBackend};
use kafe_client::model::{Amount, LoginRequest, MenuDraft, MenuId, MenuItem};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

/// Serves the canned `(status, body)` responses in order, one per
/// connection, and forwards each raw request it received.
async fn serve(responses: Vec<(u16, &'static str)>) -> (HttpBackend, mpsc::UnboundedReceiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        for (status, body) in responses {
            let (mut stream, _) = listener.accept().await.unwrap();
            let request = read_request(&mut stream).await;
            tx.send(request).unwrap();
            let reply = format!(
                "HTTP/1.1 {status} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                reason(status),
                body.len()
            );
            stream.write_all(reply.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
        }
    });

    let backend = HttpBackend::new(base_url, Duration::from_secs(5)).unwrap();
    (backend, rx)
}

async fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = stream.read(&mut chunk).await.unwrap();
        buf.extend_from_slice(&chunk[..n]);
        let text = String::from_utf8_lossy(&buf).to_string();
        if let Some(end) = text.find("\r\n\r\n") {
            let length = text[..end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= end + 4 + length || n == 0 {
                return text;
            }
        }
        if n == 0 {
            return text;
        }
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        401 => "Unauthorized",
        404 => "Not Found",
        _ => "Internal Server Error",
    }
}

#[tokio::test]
async fn test_login_posts_credentials() {
    let (backend, mut requests) = serve(vec![(200, r#"{"data":{"token":"tok-123"}}"#)]).await;

    let token = backend
        .login(&LoginRequest::new("alice", "secret"))
        .await
        .expect("Failed to login");

    assert_eq!(token, "tok-123");
    let request = requests.recv().await.unwrap();
    assert!(request.starts_with("POST /api/auth/login HTTP/1.1"));
    assert!(request.ends_with(r#"{"username":"alice","password":"secret"}"#));
}

/// Authenticated calls carry the bearer token; string prices decode.
#[tokio::test]
async fn test_list_menu_sends_bearer_token() {
    let (backend, mut requests) = serve(vec![(
        200,
        r#"{"data":[{"_id":"m1","name":"Kopi Susu","price":"18000","__v":0},{"_id":"m2","name":"Es Teh","price":8000}]}"#,
    )])
    .await;

    let menu = backend.list_menu("tok-123").await.expect("Failed to list menu");

    assert_eq!(
        menu,
        vec![
            MenuItem::new("m1", "Kopi Susu", 18000),
            MenuItem::new("m2", "Es Teh", 8000),
        ]
    );
    let request = requests.recv().await.unwrap().to_lowercase();
    assert!(request.starts_with("get /api/menu http/1.1"));
    assert!(request.contains("authorization: bearer tok-123"));
}

#[tokio::test]
async fn test_menu_item_paths() {
    let (backend, mut requests) = serve(vec![
        (200, r#"{"data":{"_id":"m1","name":"Kopi","price":20000}}"#),
        (200, ""),
    ])
    .await;
    let draft = MenuDraft {
        name: "Kopi".into(),
        price: Amount(20000),
    };

    let item = backend
        .update_menu("tok", &MenuId::from("m1"), &draft)
        .await
        .expect("Failed to update");
    assert_eq!(item.price, Amount(20000));
    backend
        .delete_menu("tok", &MenuId::from("m1"))
        .await
        .expect("Failed to delete");

    assert!(requests.recv().await.unwrap().starts_with("PUT /api/menu/m1 "));
    assert!(requests.recv().await.unwrap().starts_with("DELETE /api/menu/m1 "));
}

/// Ids go out as one encoded path segment, and a delete ignores whatever the
/// server writes back on success.
#[tokio::test]
async fn test_delete_menu_encodes_id_and_ignores_body() {
    let (backend, mut requests) = serve(vec![(200, "OK"), (404, r#"{"message":"Menu not found"}"#)]).await;

    backend
        .delete_menu("tok", &MenuId::from("a/b?c"))
        .await
        .expect("Failed to delete");
    let result = backend.delete_menu("tok", &MenuId::from("gone")).await;

    assert!(requests
        .recv()
        .await
        .unwrap()
        .starts_with("DELETE /api/menu/a%2Fb%3Fc HTTP/1.1"));
    assert_eq!(
        result,
        Err(ApiError::Server {
            status: 404,
            message: Some("Menu not found".into())
        })
    );
}

/// A missing order list is treated as empty.
#[tokio::test]
async fn test_list_orders_envelope() {
    let (backend, _requests) = serve(vec![
        (200, r#"{"orders":[{"orderNumber":12,"items":[{"name":"Kopi","quantity":2,"totalPrice":40000}],"totalAmount":40000}]}"#),
        (200, r#"{"orders":null}"#),
    ])
    .await;

    let orders = backend.list_orders("tok").await.expect("Failed to list orders");
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].order_number, "12");
    assert_eq!(orders[0].total_amount, Amount(40000));

    let orders = backend.list_orders("tok").await.expect("Failed to list orders");
    assert!(orders.is_empty());
}

/// Error statuses keep the server's `message` when the body has one.
#[tokio::test]
async fn test_error_statuses() {
    let (backend, _requests) = serve(vec![
        (401, r#"{"message":"Token tidak valid"}"#),
        (404, r#"{"message":"User not found"}"#),
        (500, "oops"),
    ])
    .await;

    assert_eq!(
        backend.list_orders("stale").await,
        Err(ApiError::Unauthorized {
            message: Some("Token tidak valid".into())
        })
    );
    assert_eq!(
        backend.login(&LoginRequest::new("bob", "pw")).await,
        Err(ApiError::Server {
            status: 404,
            message: Some("User not found".into())
        })
    );
    assert_eq!(
        backend.profile("tok").await,
        Err(ApiError::Server {
            status: 500,
            message: None
        })
    );
}

#[tokio::test]
async fn test_undecodable_success_body() {
    let (backend, _requests) = serve(vec![(200, r#"{"data":{"name":"no token"}}"#)]).await;

    let result = backend.login(&LoginRequest::new("alice", "secret")).await;

    assert!(matches!(result, Err(ApiError::Decode(_))));
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let backend = HttpBackend::new(format!("http://{addr}"), Duration::from_secs(5)).unwrap();

    let result = backend.list_menu("tok").await;

    let err = result.expect_err("Server is gone");
    assert!(matches!(err, ApiError::Network(_)));
    assert_eq!(err.user_message("unused"), "Failed to connect to server");
}
