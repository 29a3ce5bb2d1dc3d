//! Shared request plumbing for client operations (form encoding, dispatch).

// crates.io
use oauth2::{
	AsyncHttpClient, HttpRequest,
	http::{
		Method, Request,
		header::{ACCEPT, CONTENT_TYPE},
	},
};
// self
use crate::{_prelude::*, error::ConfigError, http, http::TokenHttpClient};

const JSON: &str = "application/json";
const FORM: &str = "application/x-www-form-urlencoded";

/// Status code and raw body of a provider response.
#[derive(Clone, Debug)]
pub(crate) struct RawResponse {
	pub(crate) status: u16,
	pub(crate) body: Vec<u8>,
}

/// Encodes `params` as an `application/x-www-form-urlencoded` body.
pub(crate) fn encode_form(params: &BTreeMap<String, String>) -> String {
	url::form_urlencoded::Serializer::new(String::new()).extend_pairs(params.iter()).finish()
}

/// Builds a form POST against `url`.
pub(crate) fn form_post(url: &Url, params: &BTreeMap<String, String>) -> Result<HttpRequest> {
	Request::builder()
		.method(Method::POST)
		.uri(url.as_str())
		.header(ACCEPT, JSON)
		.header(CONTENT_TYPE, FORM)
		.body(encode_form(params).into_bytes())
		.map_err(|e| ConfigError::from(e).into())
}

/// Builds an authenticated JSON GET against `url`.
pub(crate) fn json_get(url: &Url, headers: &[(String, String)]) -> Result<HttpRequest> {
	let mut builder = Request::builder().method(Method::GET).uri(url.as_str()).header(ACCEPT, JSON);

	for (name, value) in headers {
		builder = builder.header(name.as_str(), value.as_str());
	}

	builder.body(Vec::new()).map_err(|e| ConfigError::from(e).into())
}

/// Sends `request` through a fresh transport handle.
pub(crate) async fn dispatch<C>(http_client: &C, request: HttpRequest) -> Result<RawResponse>
where
	C: ?Sized + TokenHttpClient,
{
	let handle = http_client.handle();
	let response = handle.call(request).await.map_err(http::map_transport_error)?;

	Ok(RawResponse { status: response.status().as_u16(), body: response.into_body() })
}
