//! Tests for pool construction, configuration, and the synchronous request
//! surface.

use fetchpool::{Error, PoolBuilder, TransferRequest};

use reqwest::header::{HeaderValue, USER_AGENT};
use std::time::Duration;

mod common;
use common::helpers::*;

#[tokio::test]
async fn builder_defaults() {
    let pool = PoolBuilder::hidden().build().unwrap();

    assert_eq!(pool.capacity(), 4);
    let stats = pool.stats();
    assert_eq!(stats.capacity, 4);
    assert_eq!(stats.idle, 4);
    assert_eq!(stats.active, 0);
    assert_eq!(stats.queued, 0);

    pool.shutdown().await.unwrap();
}

#[tokio::test]
async fn builder_configuration() {
    let pool = test_pool_builder(2)
        .keepalive_idle(Duration::from_secs(10))
        .keepalive_interval(Duration::from_secs(2))
        .idle_timeout(Duration::from_secs(60))
        .header(USER_AGENT, HeaderValue::from_static("fetchpool-test"))
        .build()
        .unwrap();

    assert_eq!(pool.capacity(), 2);
    assert_eq!(pool.stats().idle, 2);

    pool.shutdown().await.unwrap();
}

#[tokio::test]
async fn zero_capacity_is_rejected() {
    let result = PoolBuilder::hidden().capacity(0).build();
    assert!(matches!(result, Err(Error::InvalidRequest(_))));
}

#[tokio::test]
async fn oversized_capacity_is_rejected() {
    let result = PoolBuilder::hidden().capacity(1 << 20).build();
    assert!(matches!(result, Err(Error::InvalidRequest(_))));
}

#[tokio::test]
async fn empty_output_path_fails_synchronously() {
    let pool = test_pool_builder(1).build().unwrap();

    let url = reqwest::Url::parse("http://example.com/file.bin").unwrap();
    let request = TransferRequest::new(&url, "");
    let result = pool.download(request, |_| panic!("callback must not fire"));
    assert!(matches!(result, Err(Error::InvalidRequest(_))));

    // Nothing was consumed by the rejected request.
    assert_eq!(pool.stats().idle, 1);
    pool.shutdown().await.unwrap();
}

#[tokio::test]
async fn pool_debug_format() {
    let pool = test_pool_builder(1).build().unwrap();
    let debug_str = format!("{:?}", pool);
    assert!(debug_str.contains("Pool"));
    assert!(debug_str.contains("capacity"));
    pool.shutdown().await.unwrap();
}

#[tokio::test]
async fn shutdown_of_idle_pool_completes() {
    let pool = test_pool_builder(8).build().unwrap();
    pool.shutdown().await.unwrap();
}
