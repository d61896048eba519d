use crate::handler::TransactionHandler;
use actix_web::web;

pub fn init(cfg: &mut web::ServiceConfig) {
	cfg
		// public ledger routes
		.route("/balance/{user_id}", web::get().to(TransactionHandler::get_balance_handler))
		.route("/add_transaction", web::post().to(TransactionHandler::add_transaction_handler))
		// session routes
		.route("/transfer", web::post().to(TransactionHandler::transfer_handler))
		.route("/history", web::get().to(TransactionHandler::history_handler))
		.route("/export", web::post().to(TransactionHandler::export_handler));
}
