//! Concurrent mutation against a live server.

use std::collections::HashSet;
use std::net::SocketAddr;

mod common;

#[tokio::test]
async fn test_concurrent_creates_get_unique_ids() {
    let addr: SocketAddr = "127.0.0.1:28481".parse().unwrap();
    let shutdown = common::start_server(addr).await;
    let client = reqwest::Client::builder().no_proxy().build().unwrap();

    let concurrency = 20;
    let mut handles = Vec::new();
    for i in 0..concurrency {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            client
                .post(format!("http://{}/add-product", addr))
                .header("HX-Request", "true")
                .form(&[
                    ("name", format!("Item {i}")),
                    ("description", String::new()),
                    ("price", "1.00".to_string()),
                ])
                .send()
                .await
                .map(|r| r.status().as_u16())
        }));
    }

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), 200);
    }

    // Every id from 1 through concurrency + 1 shows up exactly once
    let page = client
        .get(format!("http://{}/product-list", addr))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    let ids: HashSet<u64> = (1..=concurrency + 1)
        .filter(|id| page.contains(&format!(r#"id="product-{id}""#)))
        .collect();
    assert_eq!(ids.len() as u64, concurrency + 1);

    shutdown.trigger();
}
