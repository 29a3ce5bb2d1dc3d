//! Interactive Authorization Code walkthrough for a Zendesk account.
//!
//! The demo prints the authorize URL, waits for the user to paste the returned `state`
//! and `code` parameters via stdin, then optionally exchanges the code and fetches the
//! signed-in user's profile from `/api/v2/users/me.json`.

// std
use std::io::{self, Write};
// crates.io
use color_eyre::Result;
use url::Url;
// self
use oauth2_zendesk::{
	auth::ScopeList,
	flows::{AuthorizationOptions, ReqwestZendeskClient},
	provider::{Zendesk, ZendeskOptions},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let subdomain = prompt_with_default("Enter your Zendesk subdomain", Some("acme"))?;
	let client_id = prompt_with_default("Enter your OAuth client unique identifier", None)?;
	let client_secret = prompt_optional("Enter your OAuth client secret")?;
	let redirect_input = prompt_with_default(
		"Enter the redirect URI registered with Zendesk",
		Some("https://app.example.com/zendesk/callback"),
	)?;
	let mut options = ZendeskOptions::default()
		.subdomain(subdomain)
		.client_id(client_id)
		.redirect_uri(Url::parse(&redirect_input)?);

	if let Some(secret) = client_secret {
		options = options.client_secret(secret);
	}

	let client = ReqwestZendeskClient::new(Zendesk::from_options(options)?)?;
	let scope = ScopeList::new(["read"])?;
	let authorization = client.authorization_url(AuthorizationOptions::default().scope(scope));

	println!("Authorize URL: {}", &authorization.url);
	println!(
		"After Zendesk redirects back to your app, copy the `state` and `code` query parameters and paste them here."
	);

	let returned_state = prompt_with_default(
		"State (press Enter to reuse the generated value)",
		Some(authorization.state.as_str()),
	)?;

	authorization.validate_state(&returned_state)?;

	let Some(code) =
		prompt_optional("Authorization code (leave blank to skip the live token exchange)")?
	else {
		println!("Authorization code not provided; skipping token exchange.");

		return Ok(());
	};
	let token = client.exchange_code(&authorization, code).await?;

	println!("Access token: {}", token.token());
	println!("Token type: {}", token.token_type.as_deref().unwrap_or("bearer"));

	match token.expires_at {
		Some(expires_at) => println!("Expires at: {expires_at}"),
		None => println!("Zendesk issued a non-expiring token."),
	}

	let owner = client.resource_owner(&token).await?;

	println!("Signed in as #{:?}: {:?} <{:?}>", owner.id(), owner.name(), owner.email());

	Ok(())
}

fn prompt_with_default(message: &str, default: Option<&str>) -> Result<String> {
	loop {
		if let Some(value) = default {
			print!("{message} [{value}]: ");
		} else {
			print!("{message}: ");
		}

		io::stdout().flush()?;

		let mut input = String::new();

		io::stdin().read_line(&mut input)?;

		let trimmed = input.trim();

		if trimmed.is_empty() {
			if let Some(value) = default {
				return Ok(value.to_owned());
			}
		} else {
			return Ok(trimmed.to_owned());
		}
	}
}

fn prompt_optional(message: &str) -> Result<Option<String>> {
	print!("{message}: ");

	io::stdout().flush()?;

	let mut input = String::new();

	io::stdin().read_line(&mut input)?;

	let trimmed = input.trim();

	if trimmed.is_empty() { Ok(None) } else { Ok(Some(trimmed.to_owned())) }
}
