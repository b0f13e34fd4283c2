//! Scripted transport shared by integration tests.

// std
use std::{collections::VecDeque, io};
// self
use olx_oauth_client::{
	error::TransportError,
	http::{Transport, TransportRequest, TransportResponse},
};

/// sha1("a"), the access token issued by scripted providers.
pub const TOKEN: &str = "86f7e437faa5a7fce15d1ddcb9eaeaea377667b8";
/// sha1("b"), a well-formed authorization code.
pub const CODE: &str = "e9d71f5ee7c92d6dc9e92ffdad17b8bd49418f98";

/// Replays canned responses in order and records every request it receives.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
	pub responses: VecDeque<TransportResponse>,
	pub requests: Vec<TransportRequest>,
}
impl ScriptedTransport {
	pub fn replying(http_code: u16, body: impl Into<String>) -> Self {
		let mut transport = Self::default();

		transport.responses.push_back(TransportResponse {
			header: format!("HTTP/1.1 {http_code}\r\n\r\n"),
			body: body.into(),
			http_code,
			last_url: "https://auth.olx.com.br/oauth/token".into(),
		});

		transport
	}
}
impl Transport for ScriptedTransport {
	fn execute(
		&mut self,
		request: &TransportRequest,
	) -> Result<TransportResponse, TransportError> {
		self.requests.push(request.clone());
		self.responses.pop_front().ok_or_else(|| {
			TransportError::Io(io::Error::new(io::ErrorKind::ConnectionRefused, "Script exhausted."))
		})
	}
}
