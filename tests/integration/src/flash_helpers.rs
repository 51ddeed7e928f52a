//! Test client and views for flash message integration tests

use async_trait::async_trait;
use bytes::Bytes;
use hyper::StatusCode;
use hyper::header::{COOKIE, HeaderValue, LOCATION, SET_COOKIE};
use reinhardt_flash_core::{FlashMessage, FlashResult};
use reinhardt_flash_http::{
	FlashMessageMiddleware, Handler, Middleware, Request, Response, flash_messages,
};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// Client-side cookie storage
#[derive(Debug, Clone, Default)]
pub struct CookieJar {
	cookies: BTreeMap<String, String>,
}

impl CookieJar {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(&self, name: &str) -> Option<&str> {
		self.cookies.get(name).map(String::as_str)
	}

	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
		self.cookies.insert(name.into(), value.into());
	}

	pub fn is_empty(&self) -> bool {
		self.cookies.is_empty()
	}

	/// Value for a `Cookie` request header
	pub fn header_value(&self) -> Option<String> {
		if self.cookies.is_empty() {
			return None;
		}
		Some(
			self.cookies
				.iter()
				.map(|(name, value)| format!("{}={}", name, value))
				.collect::<Vec<_>>()
				.join("; "),
		)
	}

	/// Apply every `Set-Cookie` header of `response`
	///
	/// A cookie sent with `Max-Age=0` is deleted, as a browser would.
	pub fn absorb(&mut self, response: &Response) {
		for header in response.headers().get_all(SET_COOKIE) {
			let Ok(header) = header.to_str() else {
				continue;
			};
			let mut parts = header.split(';').map(str::trim);
			let Some((name, value)) = parts.next().and_then(|pair| pair.split_once('=')) else {
				continue;
			};
			if parts.any(|attr| attr.eq_ignore_ascii_case("Max-Age=0")) {
				self.cookies.remove(name);
			} else {
				self.cookies.insert(name.to_string(), value.to_string());
			}
		}
	}
}

/// Sends requests through the middleware, keeping cookies between them
pub struct TestClient {
	middleware: FlashMessageMiddleware,
	pub jar: CookieJar,
}

impl TestClient {
	pub fn new(middleware: FlashMessageMiddleware) -> Self {
		Self {
			middleware,
			jar: CookieJar::new(),
		}
	}

	/// Build the next request, carrying the jar's cookies
	pub fn request(&self) -> Request {
		let mut request = Request::new(Bytes::new());
		if let Some(cookies) = self.jar.header_value()
			&& let Ok(value) = HeaderValue::from_str(&cookies)
		{
			request.headers_mut().insert(COOKIE, value);
		}
		request
	}

	pub async fn send(&mut self, handler: Arc<dyn Handler>) -> FlashResult<Response> {
		let response = self.middleware.process(self.request(), handler).await?;
		self.jar.absorb(&response);
		Ok(response)
	}
}

/// Queues its messages and redirects, like a form submission
pub struct QueueView {
	messages: Vec<FlashMessage>,
}

impl QueueView {
	pub fn new(messages: impl IntoIterator<Item = FlashMessage>) -> Arc<Self> {
		Arc::new(Self {
			messages: messages.into_iter().collect(),
		})
	}
}

#[async_trait]
impl Handler for QueueView {
	async fn handle(&self, request: Request) -> FlashResult<Response> {
		let flash = flash_messages(&request)?;
		for message in &self.messages {
			flash.queue_message(message.clone())?;
		}
		let mut response = Response::new(Bytes::new());
		*response.status_mut() = StatusCode::SEE_OTHER;
		response
			.headers_mut()
			.insert(LOCATION, HeaderValue::from_static("/"));
		Ok(response)
	}
}

/// Consumes pending messages and remembers every batch it saw
#[derive(Default)]
pub struct DisplayView {
	batches: Mutex<Vec<Vec<FlashMessage>>>,
}

impl DisplayView {
	pub fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	pub fn batches(&self) -> Vec<Vec<FlashMessage>> {
		self.batches.lock().unwrap().clone()
	}

	pub fn last(&self) -> Vec<FlashMessage> {
		self.batches().pop().unwrap_or_default()
	}
}

#[async_trait]
impl Handler for DisplayView {
	async fn handle(&self, request: Request) -> FlashResult<Response> {
		let messages = flash_messages(&request)?.retrieve()?;
		let body = messages
			.iter()
			.map(|m| m.message.as_str())
			.collect::<Vec<_>>()
			.join("\n");
		self.batches.lock().unwrap().push(messages);
		Ok(Response::new(Bytes::from(body)))
	}
}

/// Reads pending messages without consuming them
#[derive(Default)]
pub struct PeekView {
	seen: Mutex<Vec<FlashMessage>>,
}

impl PeekView {
	pub fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	pub fn seen(&self) -> Vec<FlashMessage> {
		self.seen.lock().unwrap().clone()
	}
}

#[async_trait]
impl Handler for PeekView {
	async fn handle(&self, request: Request) -> FlashResult<Response> {
		let messages = flash_messages(&request)?.get_queued()?;
		*self.seen.lock().unwrap() = messages;
		Ok(Response::new(Bytes::from("OK")))
	}
}
