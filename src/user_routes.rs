use crate::handler::UserHandler;
use actix_web::web;

pub fn init(cfg: &mut web::ServiceConfig) {
	cfg
		// user mgmt routes
		.route("/register", web::post().to(UserHandler::register_handler))
		.route("/login", web::post().to(UserHandler::login_handler))
		.route("/reset_password", web::post().to(UserHandler::reset_password_handler));
}
