//! End-to-end catalog flows against a live server.

use std::net::SocketAddr;

use product_catalog::config::CatalogConfig;

mod common;

const HX: (&str, &str) = ("HX-Request", "true");

#[tokio::test]
async fn test_create_then_search_scenario() {
    let addr: SocketAddr = "127.0.0.1:28381".parse().unwrap();
    let shutdown = common::start_server(addr).await;
    let client = common::client();
    let base = format!("http://{}", addr);

    let res = client
        .post(format!("{base}/add-product"))
        .header(HX.0, HX.1)
        .form(&[("name", "Saw"), ("description", "Hand saw"), ("price", "12.50")])
        .send()
        .await
        .expect("Server unreachable");
    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["hx-replace-url"], "/product-list");
    assert_eq!(res.headers()["hx-retarget"], "#main");
    assert_eq!(res.headers()["hx-reswap"], "innerHTML");
    let body = res.text().await.unwrap();
    assert!(body.contains("/product/2/edit"), "new product gets id 2");
    assert!(body.contains("12.50"));

    let health: serde_json::Value = client
        .get(format!("{base}/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["products"], 2);

    let res = client
        .post(format!("{base}/product-list/search"))
        .header(HX.0, HX.1)
        .form(&[("search", "saw")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let body = res.text().await.unwrap();
    assert!(body.contains("Hand saw"));
    assert!(!body.contains("Smashing hammer"));

    // The cookie jar now carries the search text back to the list view
    let page = client
        .get(format!("{base}/product-list"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("<!DOCTYPE html>"));
    assert!(page.contains(r#"value="saw""#));
    assert!(!page.contains("Smashing hammer"));

    // A client without the cookie gets the unfiltered catalog
    let page = common::client()
        .get(format!("{base}/product-list"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("Smashing hammer"));
    assert!(page.contains("Hand saw"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_rejected_submissions_do_not_mutate() {
    let addr: SocketAddr = "127.0.0.1:28382".parse().unwrap();
    let shutdown = common::start_server(addr).await;
    let client = common::client();
    let base = format!("http://{}", addr);

    let res = client
        .post(format!("{base}/add-product"))
        .header(HX.0, HX.1)
        .form(&[("name", "Hammer"), ("description", "dup"), ("price", "1")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 422);
    assert!(res.text().await.unwrap().contains("Name already exists"));

    let res = client
        .post(format!("{base}/add-product"))
        .header(HX.0, HX.1)
        .form(&[("name", "Saw"), ("description", ""), ("price", "twelve")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 422);
    assert!(res.text().await.unwrap().contains("Invalid price"));

    let res = client
        .post(format!("{base}/product/999/delete"))
        .header(HX.0, HX.1)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);

    let res = client
        .post(format!("{base}/product/nope/edit"))
        .header(HX.0, HX.1)
        .form(&[("name", "X"), ("description", ""), ("price", "1")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);

    let health: serde_json::Value = client
        .get(format!("{base}/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["products"], 1);

    shutdown.trigger();
}

#[tokio::test]
async fn test_edit_price_and_ids_never_reused() {
    let addr: SocketAddr = "127.0.0.1:28383".parse().unwrap();
    let shutdown = common::start_server(addr).await;
    let client = common::client();
    let base = format!("http://{}", addr);

    let res = client
        .post(format!("{base}/product/1/edit"))
        .header(HX.0, HX.1)
        .form(&[("name", "Hammer"), ("description", "Smashing hammer"), ("price", "10.50")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert!(res.text().await.unwrap().contains("10.50"));

    let res = client
        .post(format!("{base}/product/1/delete"))
        .header(HX.0, HX.1)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["hx-replace-url"], "/product-list");

    let res = client
        .post(format!("{base}/add-product"))
        .header(HX.0, HX.1)
        .form(&[("name", "Hammer"), ("description", "Back again"), ("price", "9")])
        .send()
        .await
        .unwrap();
    let body = res.text().await.unwrap();
    assert!(body.contains("/product/2/edit"));
    assert!(!body.contains("/product/1/edit"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_plain_requests_get_redirects_and_pages() {
    let addr: SocketAddr = "127.0.0.1:28384".parse().unwrap();
    let shutdown = common::start_server(addr).await;
    let client = common::client();
    let base = format!("http://{}", addr);

    let res = client.get(format!("{base}/")).send().await.unwrap();
    assert_eq!(res.status(), 301);
    assert_eq!(res.headers()["location"], "/product-list");

    let res = client.get(format!("{base}/add-product")).send().await.unwrap();
    assert_eq!(res.status(), 307);

    let res = client.get(format!("{base}/product/1/delete")).send().await.unwrap();
    assert_eq!(res.status(), 307);

    let res = client
        .get(format!("{base}/product/1/delete"))
        .header(HX.0, HX.1)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert!(res.text().await.unwrap().contains("Hammer"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_static_assets_served_when_configured() {
    let addr: SocketAddr = "127.0.0.1:28385".parse().unwrap();
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("css")).unwrap();
    std::fs::write(dir.path().join("css/style.css"), "body { margin: 0 }").unwrap();

    let mut config = CatalogConfig::default();
    config.listener.bind_address = addr.to_string();
    config.render.static_dir = Some(dir.path().to_string_lossy().into_owned());
    let shutdown = common::start_server_with(config).await;

    let client = common::client();
    let res = client
        .get(format!("http://{}/static/css/style.css", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "body { margin: 0 }");

    shutdown.trigger();
}

#[tokio::test]
async fn test_missing_template_dir_fails_startup() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = CatalogConfig::default();
    config.render.template_dir = Some(dir.path().join("missing").to_string_lossy().into_owned());

    assert!(product_catalog::HttpServer::new(config).is_err());
}
