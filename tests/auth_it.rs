// crates.io
use httpmock::prelude::*;
// self
use rbxweb::{
	_preludet::*,
	error::{UpstreamError, ValidationError},
};

const COOKIE: &str = "_|WARNING:-DO-NOT-SHARE-THIS.sensitive.secret";

#[tokio::test]
async fn login_rejects_a_cookie_without_the_warning_prefix() {
	let server = MockServer::start_async().await;
	let any = server
		.mock_async(|when, then| {
			when.any_request();
			then.status(200);
		})
		.await;
	let client = test_client(&server.base_url());
	let err = client
		.login("not-a-session-cookie")
		.await
		.expect_err("A cookie without the warning prefix should be rejected.");

	assert!(matches!(err, Error::Validation(ValidationError::MalformedCookie)));
	assert!(client.session().snapshot().cookie.is_none());

	any.assert_calls_async(0).await;
}

#[tokio::test]
async fn login_adopts_the_cookie_and_returns_the_identity() {
	let server = MockServer::start_async().await;
	let probe = server
		.mock_async(|when, then| {
			when.path("/v1/users/authenticated")
				.header("cookie", format!(".ROBLOSECURITY={COOKIE}"));
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"id":156,"name":"builderman","displayName":"Builderman"}"#);
		})
		.await;
	let client = test_client(&server.base_url());
	let user = client.login(COOKIE).await.expect("Login with a valid cookie should succeed.");

	assert_eq!(user.id, 156);
	assert_eq!(user.name, "builderman");

	let cookie = client.session().snapshot().cookie.expect("Login should store the cookie.");

	assert_eq!(cookie.expose(), COOKIE);

	probe.assert_async().await;
}

#[tokio::test]
async fn login_gates_on_the_response_status() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.path("/v1/users/authenticated");
			then.status(401)
				.header("content-type", "application/json")
				.body(r#"{"errors":[{"code":0,"message":"Authorization has been denied for this request."}]}"#);
		})
		.await;

	let client = test_client(&server.base_url());
	let err = client.login(COOKIE).await.expect_err("A rejected cookie should fail the login.");
	let Error::Upstream(UpstreamError { errors, status }) = err else {
		panic!("A rejected login should surface as an upstream error.");
	};

	assert_eq!(status, Some(401));
	assert_eq!(errors[0].message, "Authorization has been denied for this request.");
}

#[tokio::test]
async fn relogin_overwrites_the_previous_cookie() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.path("/v1/users/authenticated");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"id":1,"name":"whoever"}"#);
		})
		.await;

	let client = test_client(&server.base_url());
	let second = format!("{COOKIE}.rotated");

	client.login(COOKIE).await.expect("First login should succeed.");
	client.login(&second).await.expect("Second login should succeed.");

	let cookie = client.session().snapshot().cookie.expect("Session cookie should be present.");

	assert_eq!(cookie.expose(), second);
}

#[tokio::test]
async fn authenticated_user_reuses_the_ambient_cookie() {
	let server = MockServer::start_async().await;
	let probe = server
		.mock_async(|when, then| {
			when.path("/v1/users/authenticated")
				.header("cookie", format!(".ROBLOSECURITY={COOKIE}"));
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"id":156,"name":"builderman"}"#);
		})
		.await;
	let client = test_client(&server.base_url());

	client.session().set_cookie(COOKIE);

	let user = client
		.authenticated_user()
		.await
		.expect("The probe should succeed with an ambient cookie.");

	assert_eq!(user.id, 156);

	probe.assert_async().await;
}
