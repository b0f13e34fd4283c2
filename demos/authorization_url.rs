//! Demonstrates the full authorization-code round trip with the default reqwest transport.
//!
//! The authorize URL is printed as an end user would receive it, and the token exchange runs
//! against a local mock of the provider's token endpoint.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use olx_oauth_client::{AuthClient, auth::TokenOutcome};

fn main() -> Result<()> {
	color_eyre::install()?;

	let mut client = AuthClient::new()?;

	client.set_config("client_id", "efbd522be22d67e1ec7224283dcd5dbad9d594d9")?;
	client.set_config("scope", "basic_user_info autoupload")?;
	client.set_config("redirect_uri", "http://www.vitormattos.com.br/return_page.php")?;
	client.set_config("client_secret", "a315f7cc0ae584a3da8ef0f6092693fb")?;

	println!("Authorize URL: {}", client.create_auth_url()?);

	let server = MockServer::start();
	let token_mock = server.mock(|when, then| {
		when.method(POST).path("/oauth/token");
		then.status(200)
			.header("content-type", "application/json")
			.body("{\"access_token\":\"86f7e437faa5a7fce15d1ddcb9eaeaea377667b8\"}");
	});

	client.set_config("auth_url", &server.url("/oauth"))?;

	match client.authenticate("e9d71f5ee7c92d6dc9e92ffdad17b8bd49418f98")? {
		TokenOutcome::AccessToken(token) => println!("Issued token: {token:?}"),
		TokenOutcome::ProviderError(payload) => println!("Provider refused: {:?}", payload.messages()),
	}

	token_mock.assert();

	println!("Client state: {}", client.state());

	Ok(())
}
