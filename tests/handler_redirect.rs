mod common;

use axum_test::TestServer;

#[tokio::test]
async fn test_redirect_success() {
    let (state, _rx, store) = common::create_memory_state();
    let server = TestServer::new(common::test_router(state)).unwrap();

    common::seed_mapping(store.as_ref(), "redirect1", "https://example.com/target", "user-1")
        .await;

    let response = server.get("/redirect1").await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_not_found() {
    let (state, _rx, _store) = common::create_memory_state();
    let server = TestServer::new(common::test_router(state)).unwrap();

    let response = server.get("/notfound").await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_redirect_expired_code_not_found() {
    let (state, _rx, store) = common::create_memory_state();
    let server = TestServer::new(common::test_router(state)).unwrap();

    common::seed_expired_mapping(store.as_ref(), "stale", "https://example.com", "user-1").await;

    let response = server.get("/stale").await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_redirect_enqueues_click() {
    let (state, mut rx, store) = common::create_memory_state();
    let server = TestServer::new(common::test_router(state)).unwrap();

    common::seed_mapping(store.as_ref(), "clickme", "https://example.com", "user-1").await;

    let response = server.get("/clickme").await;
    assert_eq!(response.status_code(), 307);

    // The event is enqueued before the redirect is returned.
    let click_event = rx.try_recv().unwrap();
    assert_eq!(click_event.code, "clickme");
}

#[tokio::test]
async fn test_failed_redirect_enqueues_nothing() {
    let (state, mut rx, _store) = common::create_memory_state();
    let server = TestServer::new(common::test_router(state)).unwrap();

    server.get("/missing").await;

    assert!(rx.try_recv().is_err());
}
