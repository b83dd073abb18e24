// crates.io
use httpmock::prelude::*;
// self
use rbxweb::{
	_preludet::*,
	endpoints::badges::BadgeUpdate,
	error::ValidationError,
};

#[tokio::test]
async fn awarded_dates_batch_the_badge_identifiers() {
	let server = MockServer::start_async().await;
	let listing = server
		.mock_async(|when, then| {
			when.path("/v1/users/7/badges/awarded-dates")
				.query_param("badgeIds", "11,12,13");
			then.status(200).header("content-type", "application/json").body(
				r#"{
					"data": [
						{"badgeId": 11, "awardedDate": "2021-07-01T00:00:00.000Z"},
						{"badgeId": 13, "awardedDate": "2022-02-03T00:00:00.000Z"}
					]
				}"#,
			);
		})
		.await;
	let client = test_client(&server.base_url());
	let awarded = client
		.badge_awarded_dates(7, &[11, 12, 13])
		.await
		.expect("Awarded-dates lookup should succeed.");

	// Unawarded badges are simply absent from the response.
	assert_eq!(awarded.len(), 2);
	assert_eq!(awarded[0].badge_id, 11);
	assert_eq!(awarded[1].awarded_date.year(), 2022);

	listing.assert_async().await;
}

#[tokio::test]
async fn awarded_dates_reject_an_empty_batch() {
	let server = MockServer::start_async().await;
	let any = server
		.mock_async(|when, then| {
			when.any_request();
			then.status(200);
		})
		.await;
	let client = test_client(&server.base_url());
	let err = client
		.badge_awarded_dates(7, &[])
		.await
		.expect_err("An empty badge batch is invalid.");

	assert!(matches!(
		err,
		Error::Validation(ValidationError::EmptyField { field: "badge_ids" })
	));

	any.assert_calls_async(0).await;
}

#[tokio::test]
async fn badge_update_sends_every_field_in_the_body() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(POST).path("/v2/logout");
			then.status(403)
				.header("x-csrf-token", "tok1")
				.header("content-type", "application/json")
				.body(r#"{"errors":[{"code":0,"message":"Token Validation Failed"}]}"#);
		})
		.await;

	let mutation = server
		.mock_async(|when, then| {
			when.method(PATCH).path("/v1/badges/11").header("x-csrf-token", "tok1").json_body(
				serde_json::json!({
					"name": "Veteran",
					"description": "Played for a year.",
					"enabled": true,
				}),
			);
			then.status(200).header("content-type", "application/json").body("{}");
		})
		.await;
	let client = test_client(&server.base_url());

	client.session().set_cookie("abc");

	let update = BadgeUpdate {
		name: "Veteran".into(),
		description: "Played for a year.".into(),
		enabled: true,
	};

	client.update_badge(11, &update).await.expect("Badge update should succeed.");

	mutation.assert_async().await;
}

#[tokio::test]
async fn badge_update_rejects_empty_text_fields() {
	let server = MockServer::start_async().await;
	let any = server
		.mock_async(|when, then| {
			when.any_request();
			then.status(200);
		})
		.await;
	let client = test_client(&server.base_url());

	client.session().set_cookie("abc");

	let update = BadgeUpdate { name: String::new(), description: "text".into(), enabled: true };
	let err = client.update_badge(11, &update).await.expect_err("An empty name is invalid.");

	assert!(matches!(err, Error::Validation(ValidationError::EmptyField { field: "name" })));

	any.assert_calls_async(0).await;
}
