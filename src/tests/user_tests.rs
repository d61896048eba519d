use actix_web::test;
use serde_json::json;

use crate::{
	models::{ErrorResponse, LoginResp, MessageResponse},
	tests::{
		fixtures::TestFixtures,
		test_utils::{init_app, setup_pool, TEST_PASSWORD},
	},
};

#[actix_web::test]
async fn test_register_handler() {
	let pool = setup_pool();
	let app = init_app!(pool);

	let resp = test::TestRequest::post()
		.uri("/register")
		.set_json(&TestFixtures::registration("alice", TEST_PASSWORD))
		.send_request(&app)
		.await;

	assert_eq!(resp.status().as_u16(), 201);
	let body: MessageResponse = test::read_body_json(resp).await;
	assert_eq!(body.message, "User created");
}

#[actix_web::test]
async fn test_duplicate_username() {
	let pool = setup_pool();
	let app = init_app!(pool);

	let first = test::TestRequest::post()
		.uri("/register")
		.set_json(&TestFixtures::registration("alice", TEST_PASSWORD))
		.send_request(&app)
		.await;
	assert!(first.status().is_success());

	let second = test::TestRequest::post()
		.uri("/register")
		.set_json(&TestFixtures::registration("alice", "another-password"))
		.send_request(&app)
		.await;
	assert_eq!(second.status().as_u16(), 400);
	let body: ErrorResponse = test::read_body_json(second).await;
	assert_eq!(body.error, "Username exists");

	// the first registration is untouched
	let login = test::TestRequest::post()
		.uri("/login")
		.set_json(&json!({ "username": "alice", "password": TEST_PASSWORD }))
		.send_request(&app)
		.await;
	assert_eq!(login.status().as_u16(), 200);
}

#[actix_web::test]
async fn test_empty_username_is_rejected() {
	let pool = setup_pool();
	let app = init_app!(pool);

	let resp = test::TestRequest::post()
		.uri("/register")
		.set_json(&TestFixtures::registration("", TEST_PASSWORD))
		.send_request(&app)
		.await;

	assert_eq!(resp.status().as_u16(), 400);
}

#[actix_web::test]
async fn test_login_handler() {
	let pool = setup_pool();
	let app = init_app!(pool);

	test::TestRequest::post()
		.uri("/register")
		.set_json(&TestFixtures::registration("alice", TEST_PASSWORD))
		.send_request(&app)
		.await;

	let resp = test::TestRequest::post()
		.uri("/login")
		.set_json(&json!({ "username": "alice", "password": TEST_PASSWORD }))
		.send_request(&app)
		.await;

	assert_eq!(resp.status().as_u16(), 200);
	let body: LoginResp = test::read_body_json(resp).await;
	assert_eq!(body.username, "alice");
	assert_eq!(body.user_id, 1);
	assert!(!body.token.is_empty());
}

#[actix_web::test]
async fn test_invalid_credentials() {
	let pool = setup_pool();
	let app = init_app!(pool);

	test::TestRequest::post()
		.uri("/register")
		.set_json(&TestFixtures::registration("alice", TEST_PASSWORD))
		.send_request(&app)
		.await;

	let wrong_password = test::TestRequest::post()
		.uri("/login")
		.set_json(&json!({ "username": "alice", "password": "wrong" }))
		.send_request(&app)
		.await;
	assert_eq!(wrong_password.status().as_u16(), 401);
	let body: ErrorResponse = test::read_body_json(wrong_password).await;
	assert_eq!(body.error, "Invalid credentials");

	let unknown_user = test::TestRequest::post()
		.uri("/login")
		.set_json(&json!({ "username": "mallory", "password": TEST_PASSWORD }))
		.send_request(&app)
		.await;
	assert_eq!(unknown_user.status().as_u16(), 401);
}

#[actix_web::test]
async fn test_reset_password() {
	let pool = setup_pool();
	let app = init_app!(pool);

	test::TestRequest::post()
		.uri("/register")
		.set_json(&TestFixtures::registration("alice", TEST_PASSWORD))
		.send_request(&app)
		.await;

	let reset = test::TestRequest::post()
		.uri("/reset_password")
		.set_json(&TestFixtures::reset("alice", "new-password"))
		.send_request(&app)
		.await;
	assert_eq!(reset.status().as_u16(), 200);

	let old = test::TestRequest::post()
		.uri("/login")
		.set_json(&json!({ "username": "alice", "password": TEST_PASSWORD }))
		.send_request(&app)
		.await;
	assert_eq!(old.status().as_u16(), 401);

	let new = test::TestRequest::post()
		.uri("/login")
		.set_json(&json!({ "username": "alice", "password": "new-password" }))
		.send_request(&app)
		.await;
	assert_eq!(new.status().as_u16(), 200);
}

#[actix_web::test]
async fn test_reset_password_unknown_user() {
	let pool = setup_pool();
	let app = init_app!(pool);

	let resp = test::TestRequest::post()
		.uri("/reset_password")
		.set_json(&TestFixtures::reset("nobody", "new-password"))
		.send_request(&app)
		.await;

	assert_eq!(resp.status().as_u16(), 404);
	let body: ErrorResponse = test::read_body_json(resp).await;
	assert_eq!(body.error, "Username not found");
}
