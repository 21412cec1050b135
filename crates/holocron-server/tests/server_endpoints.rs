use holocron_server::{AppConfig, build_app};
use reqwest::StatusCode;
use serde_json::{Value, json};
use tokio::task::JoinHandle;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn start_server(cfg: AppConfig) -> (String, tokio::sync::oneshot::Sender<()>, JoinHandle<()>) {
    let app = build_app(&cfg).expect("build app");

    // Bind to an ephemeral port
    let listener = tokio::net::TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0))
        .await
        .expect("bind");
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();

    let server = tokio::spawn(async move {
        let _ = axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = rx.await;
            })
            .await;
    });

    (format!("http://{addr}"), tx, server)
}

fn config_for(upstream: &str) -> AppConfig {
    let mut cfg = AppConfig::default();
    cfg.swapi.base_url = format!("{upstream}/api");
    cfg.swapi.timeout_ms = 1_000;
    cfg
}

fn swapi_film(uid: &str, title: &str, edited: &str) -> Value {
    json!({
        "uid": uid,
        "properties": {
            "title": title,
            "episode_id": 4,
            "opening_crawl": "It is a period of civil war.",
            "director": "George Lucas",
            "producer": "Gary Kurtz, Rick McCallum",
            "release_date": "1977-05-25",
            "created": "2014-12-10T14:23:31.880000Z",
            "edited": edited,
            "url": format!("https://www.swapi.tech/api/films/{uid}")
        }
    })
}

async fn mock_upstream(films: Vec<Value>) -> MockServer {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/films"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "ok",
            "result": films
        })))
        .mount(&upstream)
        .await;
    upstream
}

#[tokio::test]
async fn health_endpoints_work() {
    let upstream = mock_upstream(vec![]).await;
    let (base, shutdown_tx, handle) = start_server(config_for(&upstream.uri())).await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/")).send().await.unwrap();
    assert!(resp.status().is_success());
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["service"], "Holocron");

    let resp = client.get(format!("{base}/healthz")).send().await.unwrap();
    assert!(resp.status().is_success());
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "in-memory");
    assert_eq!(body["syncing"], false);

    let _ = shutdown_tx.send(());
    let _ = handle.await;
}

#[tokio::test]
async fn sync_status_then_sync_new_films() {
    let upstream = mock_upstream(vec![
        swapi_film("1", "A New Hope", "2014-12-20T19:49:45.256000Z"),
        swapi_film("2", "The Empire Strikes Back", "2014-12-15T13:07:53.386000Z"),
    ])
    .await;
    let (base, shutdown_tx, handle) = start_server(config_for(&upstream.uri())).await;
    let client = reqwest::Client::new();

    // Everything is new locally
    let resp = client
        .get(format!("{base}/api/films/sync/status"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let outcomes: Value = resp.json().await.unwrap();
    assert_eq!(outcomes.as_array().unwrap().len(), 2);
    assert_eq!(outcomes[0]["status"], "notPresentLocally");
    assert_eq!(outcomes[0]["external"]["externalId"], "1");
    assert!(outcomes[0]["local"].is_null());

    // No status selected
    let resp = client
        .post(format!("{base}/api/films/sync"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "bad-request");

    // Insert the new films
    let resp = client
        .post(format!("{base}/api/films/sync"))
        .json(&json!({ "notPresentLocally": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let films: Value = resp.json().await.unwrap();
    assert_eq!(films.as_array().unwrap().len(), 2);
    assert_eq!(films[0]["id"], 1);
    assert_eq!(films[1]["title"], "The Empire Strikes Back");

    let resp = client.get(format!("{base}/api/films")).send().await.unwrap();
    let listed: Value = resp.json().await.unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 2);

    // Second look: nothing left to do
    let outcomes: Value = client
        .get(format!("{base}/api/films/sync/status"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(outcomes[0]["status"], "presentAndUnchanged");
    assert_eq!(outcomes[1]["status"], "presentAndUnchanged");

    let _ = shutdown_tx.send(());
    let _ = handle.await;
}

#[tokio::test]
async fn deleted_film_is_reported_and_restored() {
    let upstream = mock_upstream(vec![swapi_film("1", "A New Hope", "2014-12-20T19:49:45Z")]).await;
    let (base, shutdown_tx, handle) = start_server(config_for(&upstream.uri())).await;
    let client = reqwest::Client::new();

    client
        .post(format!("{base}/api/films/sync"))
        .json(&json!({ "notPresentLocally": true }))
        .send()
        .await
        .unwrap();
    let resp = client.delete(format!("{base}/api/films/1")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let outcomes: Value = client
        .get(format!("{base}/api/films/sync/status"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(outcomes[0]["status"], "softDeletedLocally");
    assert!(!outcomes[0]["local"]["deletedAt"].is_null());

    let resp = client
        .post(format!("{base}/api/films/sync"))
        .json(&json!({ "softDeletedLocally": true }))
        .send()
        .await
        .unwrap();
    let restored: Value = resp.json().await.unwrap();
    assert_eq!(restored[0]["id"], 1);
    assert!(restored[0]["deletedAt"].is_null());

    let resp = client.get(format!("{base}/api/films/1")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let _ = shutdown_tx.send(());
    let _ = handle.await;
}

#[tokio::test]
async fn force_sync_endpoint() {
    let upstream = mock_upstream(vec![swapi_film("4", "A New Hope", "2014-12-20T19:49:45Z")]).await;
    let (base, shutdown_tx, handle) = start_server(config_for(&upstream.uri())).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/films/sync/force/4"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let film: Value = resp.json().await.unwrap();
    assert_eq!(film["externalId"], "4");
    assert_eq!(film["releaseDate"], "1977-05-25T00:00:00Z");

    let resp = client
        .post(format!("{base}/api/films/sync/force/999"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "not-found");

    let resp = client
        .post(format!("{base}/api/films/sync/force/%20"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let _ = shutdown_tx.send(());
    let _ = handle.await;
}

#[tokio::test]
async fn unavailable_upstream_degrades_to_empty() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/films"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&upstream)
        .await;
    let (base, shutdown_tx, handle) = start_server(config_for(&upstream.uri())).await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{base}/api/films/sync/status"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let outcomes: Value = resp.json().await.unwrap();
    assert_eq!(outcomes, json!([]));

    let resp = client
        .post(format!("{base}/api/films/sync"))
        .json(&json!({ "notPresentLocally": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let films: Value = resp.json().await.unwrap();
    assert_eq!(films, json!([]));

    let resp = client
        .post(format!("{base}/api/films/sync/force/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let _ = shutdown_tx.send(());
    let _ = handle.await;
}

#[tokio::test]
async fn catalog_crud_endpoints() {
    let upstream = mock_upstream(vec![]).await;
    let (base, shutdown_tx, handle) = start_server(config_for(&upstream.uri())).await;
    let client = reqwest::Client::new();

    let draft = json!({
        "title": "Rogue One",
        "episodeId": 0,
        "director": "Gareth Edwards",
        "releaseDate": "2016-12-16T00:00:00Z"
    });
    let resp = client
        .post(format!("{base}/api/films"))
        .json(&draft)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = resp.json().await.unwrap();
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["title"], "Rogue One");
    assert!(created["deletedAt"].is_null());

    let resp = client
        .put(format!("{base}/api/films/{id}"))
        .json(&json!({
            "title": "Rogue One: A Star Wars Story",
            "episodeId": 0,
            "releaseDate": "2016-12-16T00:00:00Z"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = resp.json().await.unwrap();
    assert_eq!(updated["title"], "Rogue One: A Star Wars Story");
    assert_eq!(updated["createdExternal"], created["createdExternal"]);

    let resp = client.get(format!("{base}/api/films/{id}")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client.delete(format!("{base}/api/films/{id}")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = client.get(format!("{base}/api/films/{id}")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = client.delete(format!("{base}/api/films/{id}")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = client
        .put(format!("{base}/api/films/{id}"))
        .json(&draft)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = client.get(format!("{base}/api/films/abc")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let listed: Value = client
        .get(format!("{base}/api/films"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed, json!([]));

    let _ = shutdown_tx.send(());
    let _ = handle.await;
}
