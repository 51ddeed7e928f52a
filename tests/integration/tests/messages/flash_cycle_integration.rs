//! Integration tests for the flash message request/redirect cycle

use hyper::StatusCode;
use reinhardt_flash::prelude::*;
use reinhardt_flash_integration_tests::{DisplayView, PeekView, QueueView, TestClient};
use rstest::*;

#[fixture]
fn client() -> TestClient {
	TestClient::new(FlashMessageMiddleware::with_defaults())
}

#[rstest]
#[tokio::test]
async fn test_message_survives_exactly_one_redirect(mut client: TestClient) {
	// Arrange
	let display = DisplayView::new();

	// Act
	let post = client
		.send(QueueView::new([FlashMessage::success("Saved successfully")]))
		.await
		.unwrap();
	let first_get = client.send(display.clone()).await.unwrap();
	let second_get = client.send(display.clone()).await.unwrap();

	// Assert
	assert_eq!(post.status(), StatusCode::SEE_OTHER);
	assert_eq!(first_get.body().as_ref(), b"Saved successfully");
	assert!(second_get.body().is_empty());
	assert_eq!(
		display.batches(),
		vec![vec![FlashMessage::success("Saved successfully")], vec![]]
	);
	assert!(client.jar.is_empty());
}

#[rstest]
#[tokio::test]
async fn test_messages_accumulate_across_posts_in_order(mut client: TestClient) {
	// Arrange
	let display = DisplayView::new();

	// Act
	client
		.send(QueueView::new([
			FlashMessage::info("first"),
			FlashMessage::warning("second"),
		]))
		.await
		.unwrap();
	client
		.send(QueueView::new([FlashMessage::error("third").with_title("Oops")]))
		.await
		.unwrap();
	client.send(display.clone()).await.unwrap();

	// Assert
	assert_eq!(
		display.last(),
		vec![
			FlashMessage::info("first"),
			FlashMessage::warning("second"),
			FlashMessage::error("third").with_title("Oops"),
		]
	);
}

#[rstest]
#[tokio::test]
async fn test_peek_does_not_consume(mut client: TestClient) {
	// Arrange
	let peek = PeekView::new();
	let display = DisplayView::new();
	client
		.send(QueueView::new([FlashMessage::new("still here")]))
		.await
		.unwrap();

	// Act
	let peek_response = client.send(peek.clone()).await.unwrap();
	client.send(display.clone()).await.unwrap();

	// Assert
	assert!(peek_response.headers().get(hyper::header::SET_COOKIE).is_none());
	assert_eq!(peek.seen(), vec![FlashMessage::new("still here")]);
	assert_eq!(display.last(), vec![FlashMessage::new("still here")]);
}

#[rstest]
#[tokio::test]
async fn test_html_and_title_survive_the_cookie(mut client: TestClient) {
	// Arrange
	let display = DisplayView::new();
	let message = FlashMessage::full("<b>Done</b> ✓", "Import", MessageType::Success, true);

	// Act
	client.send(QueueView::new([message.clone()])).await.unwrap();
	client.send(display.clone()).await.unwrap();

	// Assert
	assert_eq!(display.last(), vec![message]);
}

#[rstest]
#[case("garbage")]
#[case("%%%")]
#[case("AQAAAA")]
#[tokio::test]
async fn test_tampered_cookie_yields_no_messages(mut client: TestClient, #[case] value: &str) {
	// Arrange
	let display = DisplayView::new();
	client.jar.insert("flash_messages", value);

	// Act
	let response = client.send(display.clone()).await.unwrap();

	// Assert
	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(display.last(), Vec::<FlashMessage>::new());
	assert!(client.jar.get("flash_messages").is_none());
}

#[rstest]
#[tokio::test]
async fn test_other_cookies_are_left_alone(mut client: TestClient) {
	// Arrange
	let display = DisplayView::new();
	client.jar.insert("sessionid", "abc123");

	// Act
	client
		.send(QueueView::new([FlashMessage::new("hello")]))
		.await
		.unwrap();
	client.send(display.clone()).await.unwrap();

	// Assert
	assert_eq!(display.last(), vec![FlashMessage::new("hello")]);
	assert_eq!(client.jar.get("sessionid"), Some("abc123"));
}

#[rstest]
#[tokio::test]
async fn test_view_without_middleware_reports_unavailable_transport() {
	// Arrange
	let view = QueueView::new([FlashMessage::new("lost")]);
	let request = hyper::Request::new(bytes::Bytes::new());

	// Act
	let result = view.handle(request).await;

	// Assert
	assert!(matches!(result, Err(FlashError::TransportUnavailable(_))));
}
