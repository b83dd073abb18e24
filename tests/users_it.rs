// crates.io
use httpmock::prelude::*;
// self
use rbxweb::{
	_preludet::*,
	endpoints::{PageLimit, PageParams, SortOrder, thumbnails::ThumbnailSize},
	error::ValidationError,
};

async fn mock_profile_hosts(server: &MockServer) {
	server
		.mock_async(|when, then| {
			when.path("/v1/users/7");
			then.status(200).header("content-type", "application/json").body(
				r#"{"id":7,"name":"builderman","description":"Welcome.","created":"2006-03-08T00:00:00Z","isBanned":false}"#,
			);
		})
		.await;
	server
		.mock_async(|when, then| {
			when.path("/v1/users/avatar")
				.query_param("userIds", "7")
				.query_param("size", "352x352");
			then.status(200).header("content-type", "application/json").body(
				r#"{"data":[{"targetId":7,"state":"Completed","imageUrl":"https://cdn.example/avatar.png"}]}"#,
			);
		})
		.await;
	server
		.mock_async(|when, then| {
			when.path("/v1/users/avatar-headshot")
				.query_param("userIds", "7")
				.query_param("size", "352x352");
			then.status(200).header("content-type", "application/json").body(
				r#"{"data":[{"targetId":7,"state":"Completed","imageUrl":"https://cdn.example/headshot.png"}]}"#,
			);
		})
		.await;
}

#[tokio::test]
async fn profile_fan_out_pairs_each_thumbnail_with_its_request() {
	let server = MockServer::start_async().await;

	mock_profile_hosts(&server).await;

	let client = test_client(&server.base_url());
	let profile = client.user(7).await.expect("Profile fan-out should succeed.");

	assert_eq!(profile.detail.id, 7);
	assert_eq!(profile.detail.name, "builderman");
	assert_eq!(profile.avatar_url.as_deref(), Some("https://cdn.example/avatar.png"));
	assert_eq!(profile.headshot_url.as_deref(), Some("https://cdn.example/headshot.png"));
}

#[tokio::test]
async fn pending_renders_surface_as_absent_urls() {
	let server = MockServer::start_async().await;

	server.mock_async(|when, then| {
		when.path("/v1/users/7");
		then.status(200).header("content-type", "application/json").body(
			r#"{"id":7,"name":"builderman","created":"2006-03-08T00:00:00Z"}"#,
		);
	})
	.await;
	server.mock_async(|when, then| {
		when.path("/v1/users/avatar");
		then.status(200)
			.header("content-type", "application/json")
			.body(r#"{"data":[{"targetId":7,"state":"Pending","imageUrl":null}]}"#);
	})
	.await;
	server.mock_async(|when, then| {
		when.path("/v1/users/avatar-headshot");
		then.status(200)
			.header("content-type", "application/json")
			.body(r#"{"data":[{"targetId":7,"state":"Pending","imageUrl":null}]}"#);
	})
	.await;

	let client = test_client(&server.base_url());
	let profile = client.user(7).await.expect("A pending render is not an error.");

	assert_eq!(profile.avatar_url, None);
	assert_eq!(profile.headshot_url, None);
}

#[tokio::test]
async fn username_lookup_resolves_through_the_legacy_host() {
	let server = MockServer::start_async().await;

	server.mock_async(|when, then| {
		when.path("/users/get-by-username").query_param("username", "builderman");
		then.status(200)
			.header("content-type", "application/json")
			.body(r#"{"Id":7,"Username":"builderman"}"#);
	})
	.await;

	mock_profile_hosts(&server).await;

	let client = test_client(&server.base_url());
	let profile =
		client.user_by_username("builderman").await.expect("Username lookup should succeed.");

	assert_eq!(profile.detail.id, 7);
}

#[tokio::test]
async fn empty_username_is_rejected_before_any_network_call() {
	let server = MockServer::start_async().await;
	let any = server
		.mock_async(|when, then| {
			when.any_request();
			then.status(200);
		})
		.await;
	let client = test_client(&server.base_url());
	let err = client.user_by_username("").await.expect_err("An empty username is invalid.");

	assert!(matches!(
		err,
		Error::Validation(ValidationError::EmptyField { field: "username" })
	));

	any.assert_calls_async(0).await;
}

#[tokio::test]
async fn unsupported_thumbnail_size_is_rejected_before_any_network_call() {
	let server = MockServer::start_async().await;
	let any = server
		.mock_async(|when, then| {
			when.any_request();
			then.status(200);
		})
		.await;
	let client = test_client(&server.base_url());
	let err = client
		.avatars(&[7], ThumbnailSize::new(33, 33))
		.await
		.expect_err("A size outside the allowed table is invalid.");

	assert!(matches!(
		err,
		Error::Validation(ValidationError::UnsupportedThumbnailSize {
			kind: "avatar",
			width: 33,
			height: 33,
		})
	));

	any.assert_calls_async(0).await;
}

#[tokio::test]
async fn badge_listing_passes_the_cursor_through_and_coerces_timestamps() {
	let server = MockServer::start_async().await;
	let listing = server
		.mock_async(|when, then| {
			when.path("/v1/users/7/badges")
				.query_param("limit", "25")
				.query_param("sortOrder", "Desc")
				.query_param("cursor", "opaque-cursor");
			then.status(200).header("content-type", "application/json").body(
				r#"{
					"previousPageCursor": null,
					"nextPageCursor": "next-cursor",
					"data": [
						{"id": 11, "name": "Veteran", "enabled": true,
						 "created": "2021-07-01T00:00:00.000Z", "updated": "2021-07-02T00:00:00.000Z"},
						{"id": 12, "name": "Homestead", "enabled": false,
						 "created": "2020-01-05T12:30:00.000Z", "updated": "2020-01-06T12:30:00.000Z"}
					]
				}"#,
			);
		})
		.await;
	let client = test_client(&server.base_url());
	let params = PageParams {
		limit: PageLimit::TwentyFive,
		sort_order: SortOrder::Desc,
		cursor: Some("opaque-cursor".into()),
	};
	let page = client.user_badges(7, &params).await.expect("Badge listing should succeed.");

	assert_eq!(page.previous_page_cursor, None);
	assert_eq!(page.next_page_cursor.as_deref(), Some("next-cursor"));
	assert_eq!(page.data.len(), 2);
	assert_eq!(page.data[0].id, 11);
	assert_eq!(page.data[1].id, 12);
	assert_eq!(page.data[0].created.year(), 2021);
	assert_eq!(page.data[1].created.year(), 2020);

	listing.assert_async().await;
}

#[tokio::test]
async fn group_memberships_flatten_the_page_envelope() {
	let server = MockServer::start_async().await;

	server.mock_async(|when, then| {
		when.path("/v1/users/7/groups/roles");
		then.status(200).header("content-type", "application/json").body(
			r#"{
				"data": [
					{"group": {"id": 5, "name": "Builders", "memberCount": 3,
					           "shout": {"body": "hello", "created": "2021-07-01T00:00:00.000Z",
					                     "updated": "2021-07-01T00:00:00.000Z"}},
					 "role": {"id": 9, "name": "Member", "rank": 1}},
					{"group": {"id": 6, "name": "Pilots", "memberCount": 8, "shout": null},
					 "role": {"id": 10, "name": "Captain", "rank": 200}}
				]
			}"#,
		);
	})
	.await;

	let client = test_client(&server.base_url());
	let memberships = client.user_groups(7).await.expect("Membership listing should succeed.");

	assert_eq!(memberships.len(), 2);
	assert_eq!(memberships[0].group.id, 5);
	assert_eq!(memberships[0].role.rank, 1);
	assert!(memberships[1].group.shout.is_none());
}

#[tokio::test]
async fn social_mutation_requires_the_full_credential_pair() {
	let server = MockServer::start_async().await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/v2/logout");
			then.status(403)
				.header("x-csrf-token", "tok1")
				.header("content-type", "application/json")
				.body(r#"{"errors":[{"code":0,"message":"Token Validation Failed"}]}"#);
		})
		.await;
	let follow = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/v1/users/9/follow")
				.header("cookie", ".ROBLOSECURITY=abc")
				.header("x-csrf-token", "tok1");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"success":true,"isCaptchaResponse":false}"#);
		})
		.await;
	let client = test_client(&server.base_url());

	client.session().set_cookie("abc");

	let outcome = client.follow(9).await.expect("Follow mutation should succeed.");

	assert!(outcome.success);
	assert!(!outcome.is_captcha_response);

	refresh.assert_async().await;
	follow.assert_async().await;
}
