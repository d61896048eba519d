use crate::{
	config::AppConfig,
	constants::DEFAULT_DEPOSIT_LABEL,
	db::DbPool,
	error::LedgerError,
	export::{export_csv, ExportOutcome},
	midware::jwt::JWT,
	models::{
		AddTransactionRequest, BalanceResp, ErrorResponse, ExportResp, LoginRequest, LoginResp,
		MessageResponse, RegisterRequest, ResetPasswordRequest, Session, TransferRequest,
		TransferResp,
	},
	repo::{LedgerRepo, UserRepo},
};
use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

fn validation_failed(e: validator::ValidationErrors) -> HttpResponse {
	log::error!("Validation error: {:?}", e);
	HttpResponse::BadRequest().json(ErrorResponse { error: e.to_string() })
}

pub struct UserHandler {}

impl UserHandler {
	pub async fn register_handler(
		pool: web::Data<DbPool>,
		req: web::Json<RegisterRequest>,
	) -> Result<HttpResponse, LedgerError> {
		log::info!("Attempting to register username: {}", req.username);
		if let Err(e) = req.validate() {
			return Ok(validation_failed(e));
		}

		UserRepo::new(&pool).register(&req.username, &req.password)?;
		Ok(HttpResponse::Created().json(MessageResponse { message: "User created".to_string() }))
	}

	pub async fn login_handler(
		pool: web::Data<DbPool>,
		jwt: web::Data<JWT>,
		req: web::Json<LoginRequest>,
	) -> Result<HttpResponse, LedgerError> {
		let session = UserRepo::new(&pool).verify(&req.username, &req.password)?;

		match jwt.create_jwt(&session) {
			Ok(token) => {
				log::info!("Login successful for user ID: {}", session.user_id);
				Ok(HttpResponse::Ok().json(LoginResp {
					user_id: session.user_id,
					username: session.username,
					token,
				}))
			},
			Err(e) => {
				log::error!("JWT creation error: {:?}", e);
				Ok(HttpResponse::InternalServerError().json(ErrorResponse {
					error: "Failed to create authentication token".to_string(),
				}))
			},
		}
	}

	pub async fn reset_password_handler(
		pool: web::Data<DbPool>,
		req: web::Json<ResetPasswordRequest>,
	) -> Result<HttpResponse, LedgerError> {
		if let Err(e) = req.validate() {
			return Ok(validation_failed(e));
		}

		UserRepo::new(&pool).reset_password(&req.username, &req.new_password)?;
		Ok(HttpResponse::Ok()
			.json(MessageResponse { message: "Password reset successfully".to_string() }))
	}
}

pub struct TransactionHandler {}

impl TransactionHandler {
	pub async fn get_balance_handler(
		pool: web::Data<DbPool>,
		path: web::Path<i32>,
	) -> Result<impl Responder, LedgerError> {
		let user_id = path.into_inner();
		let balance = LedgerRepo::new(&pool).balance_of(user_id)?;
		log::info!("Retrieved balance for user {}: {:.2}", user_id, balance);
		Ok(web::Json(BalanceResp { balance }))
	}

	pub async fn add_transaction_handler(
		pool: web::Data<DbPool>,
		req: web::Json<AddTransactionRequest>,
	) -> Result<HttpResponse, LedgerError> {
		let label = req.label.as_deref().unwrap_or(DEFAULT_DEPOSIT_LABEL);
		LedgerRepo::new(&pool).deposit(req.user_id, req.amount, label)?;
		Ok(HttpResponse::Created().json(MessageResponse { message: "Success".to_string() }))
	}

	pub async fn transfer_handler(
		pool: web::Data<DbPool>,
		session: web::ReqData<Session>,
		req: web::Json<TransferRequest>,
	) -> Result<HttpResponse, LedgerError> {
		if let Err(e) = req.validate() {
			return Ok(validation_failed(e));
		}

		let ledger = LedgerRepo::new(&pool);
		let receipt = ledger.transfer(&session, &req.to_username, req.amount)?;
		let balance = ledger.balance_of(session.user_id)?;
		Ok(HttpResponse::Ok().json(TransferResp {
			message: format!("{:.2} sent to {}", receipt.amount, receipt.recipient),
			balance,
		}))
	}

	pub async fn history_handler(
		pool: web::Data<DbPool>,
		session: web::ReqData<Session>,
	) -> Result<impl Responder, LedgerError> {
		let entries = LedgerRepo::new(&pool).history_of(session.user_id)?;
		log::info!("Retrieved {} entries for user: {}", entries.len(), session.user_id);
		Ok(web::Json(entries))
	}

	pub async fn export_handler(
		pool: web::Data<DbPool>,
		config: web::Data<AppConfig>,
		session: web::ReqData<Session>,
	) -> Result<impl Responder, LedgerError> {
		let resp = match export_csv(&pool, &session, &config.export_dir)? {
			ExportOutcome::Written(path) => ExportResp {
				message: "CSV saved".to_string(),
				path: Some(path.display().to_string()),
			},
			ExportOutcome::Empty => {
				ExportResp { message: "No data to export".to_string(), path: None }
			},
		};
		Ok(web::Json(resp))
	}
}
