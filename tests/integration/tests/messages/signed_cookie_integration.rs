//! Integration tests for HMAC-signed flash cookies

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use reinhardt_flash::prelude::*;
use reinhardt_flash::serialize;
use reinhardt_flash_integration_tests::{DisplayView, QueueView, TestClient};
use rstest::*;

const KEY: &[u8] = b"integration-secret-key-0123456789";

#[fixture]
fn signed_client() -> TestClient {
	TestClient::new(FlashMessageMiddleware::new(
		FlashCookieConfig::default().with_secret_key(KEY).unwrap(),
	))
}

#[rstest]
#[tokio::test]
async fn test_signed_cycle_delivers_messages(mut signed_client: TestClient) {
	// Arrange
	let display = DisplayView::new();

	// Act
	signed_client
		.send(QueueView::new([FlashMessage::success("Signed and delivered")]))
		.await
		.unwrap();
	let cookie = signed_client.jar.get("flash_messages").unwrap().to_string();
	signed_client.send(display.clone()).await.unwrap();

	// Assert
	let (_, signature) = cookie.rsplit_once('.').unwrap();
	assert_eq!(signature.len(), 64);
	assert_eq!(display.last(), vec![FlashMessage::success("Signed and delivered")]);
}

#[rstest]
#[tokio::test]
async fn test_forged_payload_is_rejected(mut signed_client: TestClient) {
	// Arrange
	let display = DisplayView::new();
	signed_client
		.send(QueueView::new([FlashMessage::info("genuine")]))
		.await
		.unwrap();
	let cookie = signed_client.jar.get("flash_messages").unwrap().to_string();
	let (_, signature) = cookie.rsplit_once('.').unwrap();
	let forged = FlashMessage::full("<script>", "", MessageType::Error, true);
	let forged_payload = URL_SAFE_NO_PAD.encode(serialize(&[forged]).unwrap());
	signed_client
		.jar
		.insert("flash_messages", format!("{}.{}", forged_payload, signature));

	// Act
	signed_client.send(display.clone()).await.unwrap();

	// Assert
	assert!(display.last().is_empty());
	assert!(signed_client.jar.get("flash_messages").is_none());
}

#[rstest]
#[tokio::test]
async fn test_unsigned_cookie_rejected_when_key_configured(mut signed_client: TestClient) {
	// Arrange
	let display = DisplayView::new();
	let unsigned = URL_SAFE_NO_PAD.encode(serialize(&[FlashMessage::new("unsigned")]).unwrap());
	signed_client.jar.insert("flash_messages", unsigned);

	// Act
	signed_client.send(display.clone()).await.unwrap();

	// Assert
	assert!(display.last().is_empty());
}

#[rstest]
#[tokio::test]
async fn test_cookie_signed_with_other_key_is_rejected() {
	// Arrange
	let mut writer = TestClient::new(FlashMessageMiddleware::new(
		FlashCookieConfig::default()
			.with_secret_key(b"another-secret-key-0123456789abcd")
			.unwrap(),
	));
	let mut reader = TestClient::new(FlashMessageMiddleware::new(
		FlashCookieConfig::default().with_secret_key(KEY).unwrap(),
	));
	let display = DisplayView::new();

	// Act
	writer
		.send(QueueView::new([FlashMessage::new("wrong key")]))
		.await
		.unwrap();
	reader.jar = writer.jar.clone();
	reader.send(display.clone()).await.unwrap();

	// Assert
	assert!(display.last().is_empty());
}
