use super::*;

use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

struct SlowProvider;

#[async_trait]
impl GeolocationProvider for SlowProvider {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(Coordinates::new(0.0, 0.0))
    }
}

struct CountingProvider {
    calls: AtomicUsize,
}

#[async_trait]
impl GeolocationProvider for CountingProvider {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Coordinates::new(10.0 + call as f64, 20.0))
    }
}

fn local_lookup(endpoint: String) -> IpGeolocation {
    IpGeolocation {
        http: Client::builder().no_proxy().build().expect("client"),
        endpoint,
    }
}

async fn spawn_lookup_server(body: Value) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new().route("/json/", get(move || async move { Json(body) }));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}/json/")
}

#[tokio::test(start_paused = true)]
async fn slow_provider_times_out() {
    let err = locate(&SlowProvider, LOCATE_TIMEOUT)
        .await
        .expect_err("must time out");
    assert!(matches!(err, GeolocationError::Timeout { waited_ms: 15_000 }));
}

#[tokio::test]
async fn every_locate_asks_the_provider_again() {
    let provider = CountingProvider {
        calls: AtomicUsize::new(0),
    };
    let first = locate(&provider, LOCATE_TIMEOUT).await.expect("first");
    let second = locate(&provider, LOCATE_TIMEOUT).await.expect("second");
    assert_ne!(first, second);
    assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn fixed_position_without_coordinates_is_unsupported() {
    let err = locate(&FixedPosition(None), LOCATE_TIMEOUT)
        .await
        .expect_err("must fail");
    assert!(matches!(err, GeolocationError::Unsupported));

    let here = Coordinates::new(13.7563, 100.5018);
    assert_eq!(
        locate(&FixedPosition(Some(here)), LOCATE_TIMEOUT)
            .await
            .expect("fixed"),
        here
    );
}

#[tokio::test]
async fn out_of_range_position_is_rejected() {
    let err = locate(&FixedPosition(Some(Coordinates::new(120.0, 0.0))), LOCATE_TIMEOUT)
        .await
        .expect_err("must fail");
    assert!(matches!(err, GeolocationError::Unavailable(_)));
}

#[tokio::test]
async fn ip_lookup_reads_latitude_and_longitude() {
    let url = spawn_lookup_server(json!({"ip": "203.0.113.9", "latitude": 13.75, "longitude": 100.5})).await;
    let position = locate(&local_lookup(url), LOCATE_TIMEOUT)
        .await
        .expect("position");
    assert_eq!(position, Coordinates::new(13.75, 100.5));
}

#[tokio::test]
async fn ip_lookup_without_coordinates_is_unavailable() {
    let url = spawn_lookup_server(json!({"error": true, "reason": "RateLimited"})).await;
    let err = locate(&local_lookup(url), LOCATE_TIMEOUT)
        .await
        .expect_err("must fail");
    assert!(matches!(err, GeolocationError::Unavailable(_)));
}
