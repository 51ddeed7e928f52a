//! Integration tests for settings-driven flash middleware

use reinhardt_flash::conf::{FlashSettings, SettingsError};
use reinhardt_flash::prelude::*;
use reinhardt_flash_integration_tests::{DisplayView, QueueView, TestClient};
use rstest::*;
use std::io::Write;

fn write_settings(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
	let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
	file.write_all(contents.as_bytes()).unwrap();
	file
}

#[rstest]
#[tokio::test]
async fn test_toml_settings_drive_cookie_attributes() {
	// Arrange
	let file = write_settings(
		".toml",
		r#"
secret_key = "toml-secret-key-0123456789abcdefgh"
cookie_name = "notices"
cookie_path = "/app"
cookie_secure = true
cookie_same_site = "Strict"
cookie_max_age = 120
"#,
	);
	let settings = FlashSettings::from_file(file.path()).unwrap();
	let mut client = TestClient::new(FlashMessageMiddleware::from_settings(&settings).unwrap());
	let display = DisplayView::new();

	// Act
	let response = client
		.send(QueueView::new([FlashMessage::success("configured")]))
		.await
		.unwrap();
	client.send(display.clone()).await.unwrap();

	// Assert
	let header = response
		.headers()
		.get(hyper::header::SET_COOKIE)
		.unwrap()
		.to_str()
		.unwrap();
	assert!(header.starts_with("notices="));
	assert!(header.contains("Path=/app"));
	assert!(header.contains("Secure"));
	assert!(header.contains("SameSite=Strict"));
	assert!(header.contains("Max-Age=120"));
	assert_eq!(display.last(), vec![FlashMessage::success("configured")]);
}

#[rstest]
#[tokio::test]
async fn test_json_settings_without_key_are_unsigned() {
	// Arrange
	let file = write_settings(".json", r#"{ "debug": true, "cookie_name": "flash" }"#);
	let settings = FlashSettings::from_file(file.path()).unwrap();
	let mut client = TestClient::new(FlashMessageMiddleware::from_settings(&settings).unwrap());

	// Act
	client
		.send(QueueView::new([FlashMessage::new("plain")]))
		.await
		.unwrap();

	// Assert
	let cookie = client.jar.get("flash").unwrap();
	assert!(!cookie.contains('.'));
	assert!(!settings.is_signed());
}

#[rstest]
#[case("secret_key = \"too-short\"")]
#[case("cookie_name = \"\"")]
#[case("cookie_same_site = \"None\"")]
#[case("cookie_path = \"/a\\nb\"")]
#[case("cookie_path = \"/; Domain=evil.example\"")]
#[case("cookie_domain = \"example.com; Secure\"")]
fn test_invalid_settings_reject_middleware(#[case] contents: &str) {
	// Arrange
	let file = write_settings(".toml", contents);
	let settings = FlashSettings::from_file(file.path()).unwrap();

	// Act
	let result = FlashMessageMiddleware::from_settings(&settings);

	// Assert
	assert!(matches!(result, Err(SettingsError::ValidationError(_))));
}
