//! Demonstrates plugging a caller-owned transport into the client.
//!
//! The transport below never touches the network; it answers the token endpoint from memory
//! and echoes apps API calls, which is enough to drive every client operation.

// crates.io
use color_eyre::Result;
// self
use olx_oauth_client::{
	AuthClient,
	config::Config,
	error::TransportError,
	http::{Transport, TransportRequest, TransportResponse},
};

#[derive(Debug, Default)]
struct InMemoryTransport {
	sent: usize,
}
impl Transport for InMemoryTransport {
	fn execute(
		&mut self,
		request: &TransportRequest,
	) -> Result<TransportResponse, TransportError> {
		self.sent += 1;

		let body = if request.url.ends_with("/token") {
			"{\"access_token\":\"86f7e437faa5a7fce15d1ddcb9eaeaea377667b8\"}".to_owned()
		} else {
			request.body.clone()
		};

		Ok(TransportResponse {
			header: "HTTP/1.1 200 OK\r\n\r\n".into(),
			body,
			http_code: 200,
			last_url: request.url.clone(),
		})
	}
}

fn main() -> Result<()> {
	color_eyre::install()?;

	let config = Config::from_json_str(
		r#"{
			"client_id": "efbd522be22d67e1ec7224283dcd5dbad9d594d9",
			"scope": "autoupload",
			"redirect_uri": "https://example.com/callback",
			"client_secret": "a315f7cc0ae584a3da8ef0f6092693fb"
		}"#,
	)?;
	let mut client = AuthClient::with_transport(config, InMemoryTransport::default())?;
	let outcome = client.authenticate("e9d71f5ee7c92d6dc9e92ffdad17b8bd49418f98")?;

	println!("Token issued: {}", outcome.access_token().is_some());

	let response = client.call("autoupload/import", serde_json::json!({ "ad_list": [] }))?;

	println!("Echoed {} from {}", response.body, response.last_url);
	println!("Requests sent: {}", client.transport().sent);

	Ok(())
}
