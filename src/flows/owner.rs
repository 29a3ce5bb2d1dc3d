//! Resource owner profile fetch.

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, ResourceOwner},
	flows::{Client, common},
	http::TokenHttpClient,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	provider::OAuthProvider,
};

impl<P, C> Client<P, C>
where
	P: ?Sized + OAuthProvider,
	C: ?Sized + TokenHttpClient,
{
	/// Fetches the profile of the user who granted `token`.
	pub async fn resource_owner(&self, token: &AccessToken) -> Result<ResourceOwner> {
		const KIND: FlowKind = FlowKind::ResourceOwner;

		let span = FlowSpan::new(KIND, self.provider.name(), "resource_owner");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let url = self.provider.resource_owner_details_url(token);
				let headers = self.provider.authorization_headers(token);
				let http_request = common::json_get(&url, &headers)?;
				let response = common::dispatch(self.http_client.as_ref(), http_request).await?;

				self.provider.check_response(response.status, &response.body)?;
				self.provider.create_resource_owner(response.status, &response.body, token)
			})
			.await;

		obs::record_flow_outcome(KIND, FlowOutcome::of(&result));

		result
	}
}
