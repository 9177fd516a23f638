use base64::{engine::general_purpose::STANDARD, Engine};
use suggestion_service::services::{HttpImageFetcher, ImageFetcher};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn fetches_and_encodes_image_bytes() {
    let server = MockServer::start().await;
    let bytes = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
    Mock::given(method("GET"))
        .and(path("/outfit.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(bytes.clone()))
        .mount(&server)
        .await;

    let image = HttpImageFetcher::new()
        .fetch_encoded(&format!("{}/outfit.jpg", server.uri()))
        .await
        .expect("fetch failed");

    assert_eq!(image.base64(), STANDARD.encode(&bytes));
    assert!(image.data_url().starts_with("data:image/jpeg;base64,"));
}

#[tokio::test]
async fn non_success_status_is_a_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing.jpg"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = HttpImageFetcher::new()
        .fetch_encoded(&format!("{}/missing.jpg", server.uri()))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("failed to fetch image"));
}

#[tokio::test]
async fn unreachable_host_is_a_fetch_error() {
    let err = HttpImageFetcher::new()
        .fetch_encoded("http://127.0.0.1:1/outfit.jpg")
        .await
        .unwrap_err();

    assert!(err.to_string().contains("failed to fetch image"));
}
