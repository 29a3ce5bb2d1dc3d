//! Scripted transport shared by the integration tests.

#![allow(dead_code)]

// std
use std::{collections::VecDeque, future::Future, io, pin::Pin, sync::Arc};
// crates.io
use parking_lot::Mutex;
// self
use oauth2_zendesk::{
	http::TokenHttpClient,
	oauth2::{AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse, http::Response},
	provider::{Zendesk, ZendeskOptions},
	url::{Url, form_urlencoded},
};

pub const CLIENT_ID: &str = "mock_client_id";
pub const CLIENT_SECRET: &str = "mock_secret";
pub const ACCESS_TOKEN_RESPONSE: &str = r#"{"access_token":"mock_access_token"}"#;
pub const USER_RESPONSE: &str = r#"{"user":{"id":35436,"url":"https://mock.zendesk.com/api/v2/users/35436.json","name":"Johnny Agent","email":"johnny@example.com","role":"agent","active":true}}"#;

/// Request captured by [`ScriptedHttpClient`].
#[derive(Clone, Debug)]
pub struct RecordedRequest {
	pub method: String,
	pub url: Url,
	pub headers: Vec<(String, String)>,
	pub body: Vec<u8>,
}
impl RecordedRequest {
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}

	pub fn form(&self) -> Vec<(String, String)> {
		form_urlencoded::parse(&self.body).into_owned().collect()
	}

	pub fn form_value(&self, key: &str) -> Option<String> {
		self.form().into_iter().find(|(k, _)| k == key).map(|(_, v)| v)
	}
}

#[derive(Default)]
struct Script {
	responses: VecDeque<(u16, Vec<u8>)>,
	requests: Vec<RecordedRequest>,
}

/// Transport replaying canned responses in order and recording every request.
#[derive(Clone, Default)]
pub struct ScriptedHttpClient {
	script: Arc<Mutex<Script>>,
}
impl ScriptedHttpClient {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn respond(self, status: u16, body: impl Into<Vec<u8>>) -> Self {
		self.script.lock().responses.push_back((status, body.into()));

		self
	}

	pub fn requests(&self) -> Vec<RecordedRequest> {
		self.script.lock().requests.clone()
	}
}
impl TokenHttpClient for ScriptedHttpClient {
	type Handle = ScriptedHandle;
	type TransportError = io::Error;

	fn handle(&self) -> Self::Handle {
		ScriptedHandle { script: self.script.clone() }
	}
}

pub struct ScriptedHandle {
	script: Arc<Mutex<Script>>,
}
impl<'c> AsyncHttpClient<'c> for ScriptedHandle {
	type Error = HttpClientError<io::Error>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send + Sync>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		let script = self.script.clone();

		Box::pin(async move {
			let recorded = RecordedRequest {
				method: request.method().to_string(),
				url: Url::parse(&request.uri().to_string())
					.expect("Recorded request URI should be absolute."),
				headers: request
					.headers()
					.iter()
					.map(|(name, value)| {
						(name.to_string(), value.to_str().unwrap_or_default().to_owned())
					})
					.collect(),
				body: request.body().clone(),
			};
			let next = {
				let mut script = script.lock();

				script.requests.push(recorded);
				script.responses.pop_front()
			};
			let (status, body) = next.ok_or_else(|| {
				HttpClientError::Io(io::Error::other("No scripted response left."))
			})?;

			Response::builder().status(status).body(body).map_err(HttpClientError::Http)
		})
	}
}

pub fn options(subdomain: &str) -> ZendeskOptions {
	ZendeskOptions::default()
		.client_id(CLIENT_ID)
		.client_secret(CLIENT_SECRET)
		.redirect_uri(Url::parse("https://app.example.com/callback").expect("Redirect should parse."))
		.subdomain(subdomain)
}

pub fn zendesk(subdomain: &str) -> Zendesk {
	Zendesk::from_options(options(subdomain)).expect("Zendesk fixture should build.")
}
