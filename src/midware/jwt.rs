use crate::{
	constants::{AUTHORIZATION, EMPTY, IGNORE_ROUTES, MESSAGE_INVALID_TOKEN, ONE_WEEK},
	models::Session,
};
use actix_service::forward_ready;
use actix_web::{
	body::EitherBody,
	dev::{Service, ServiceRequest, ServiceResponse, Transform},
	http::Method,
	Error as AxError, HttpMessage, HttpResponse,
};
use chrono::Utc;
use futures::future::{ok, LocalBoxFuture, Ready};
use jsonwebtoken::{decode, encode, errors::Error, DecodingKey, EncodingKey, Header, Validation};
use log::{error, info};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
	pub iat: usize,
	pub exp: usize,
	pub sub: String,
	pub username: String,
}

#[derive(Serialize, Deserialize)]
pub struct ResponseBody {
	message: String,
	data: String,
}

impl ResponseBody {
	fn new(m: &str, d: &str) -> Self {
		Self { message: String::from(m), data: String::from(d) }
	}
}

/// Issues and checks the bearer tokens that carry a [`Session`] across
/// requests.
#[derive(Clone)]
pub struct JWT {
	secret: String,
}

impl JWT {
	pub fn new(s: &str) -> Self {
		Self { secret: s.to_string() }
	}

	pub fn create_jwt(&self, session: &Session) -> Result<String, Error> {
		let now = Utc::now().timestamp() as usize;
		let claims = Claims {
			iat: now,
			exp: now + ONE_WEEK,
			sub: session.user_id.to_string(),
			username: session.username.clone(),
		};
		info!("Creating token for user ID: {}", claims.sub);
		encode(&Header::default(), &claims, &EncodingKey::from_secret(self.secret.as_ref()))
	}

	pub fn verify_jwt(&self, token: &str) -> Result<Claims, Error> {
		decode::<Claims>(
			token,
			&DecodingKey::from_secret(self.secret.as_ref()),
			&Validation::default(),
		)
		.map(|data| data.claims)
	}

	/// Verifies the token and turns its claims back into a session.
	pub fn session_from_token(&self, token: &str) -> Option<Session> {
		match self.verify_jwt(token) {
			Ok(claims) => match claims.sub.parse::<i32>() {
				Ok(user_id) => Some(Session { user_id, username: claims.username }),
				Err(e) => {
					error!("Token subject is not a user ID: {:?}", e);
					None
				},
			},
			Err(e) => {
				error!("Invalid token: {:?}", e);
				None
			},
		}
	}
}

/// Rejects requests without a valid bearer token, except for the public
/// routes. Accepted requests get their [`Session`] in the request extensions.
pub struct Authentication {
	jwt: JWT,
}

impl Authentication {
	pub fn new(secret: &str) -> Self {
		Self { jwt: JWT::new(secret) }
	}
}

impl<S, B> Transform<S, ServiceRequest> for Authentication
where
	S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = AxError>,
	S::Future: 'static,
	B: 'static,
{
	type Response = ServiceResponse<EitherBody<B>>;
	type Error = AxError;
	type InitError = ();
	type Transform = AuthenticationMiddleware<S>;
	type Future = Ready<Result<Self::Transform, Self::InitError>>;

	fn new_transform(&self, service: S) -> Self::Future {
		ok(AuthenticationMiddleware { jwt: self.jwt.clone(), service })
	}
}

pub struct AuthenticationMiddleware<S> {
	jwt: JWT,
	service: S,
}

fn is_public(req: &ServiceRequest) -> bool {
	Method::OPTIONS == *req.method() ||
		IGNORE_ROUTES.iter().any(|route| req.path().starts_with(route))
}

fn bearer_token(req: &ServiceRequest) -> Option<&str> {
	let header = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
	if header.starts_with("bearer") || header.starts_with("Bearer") {
		Some(header[6..].trim())
	} else {
		None
	}
}

impl<S, B> Service<ServiceRequest> for AuthenticationMiddleware<S>
where
	S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = AxError>,
	S::Future: 'static,
	B: 'static,
{
	type Response = ServiceResponse<EitherBody<B>>;
	type Error = AxError;
	type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

	forward_ready!(service);

	fn call(&self, req: ServiceRequest) -> Self::Future {
		info!("## Req: {}", req.path());

		if !is_public(&req) {
			let session = bearer_token(&req).and_then(|token| self.jwt.session_from_token(token));
			match session {
				Some(session) => {
					req.extensions_mut().insert(session);
				},
				None => {
					let (request, _pl) = req.into_parts();
					let response = HttpResponse::Unauthorized()
						.json(ResponseBody::new(MESSAGE_INVALID_TOKEN, EMPTY))
						.map_into_right_body();

					return Box::pin(async { Ok(ServiceResponse::new(request, response)) });
				},
			}
		}

		let res = self.service.call(req);

		Box::pin(async move { res.await.map(ServiceResponse::map_into_left_body) })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn token_round_trips_session() {
		let jwt = JWT::new("test-secret");
		let session = Session { user_id: 7, username: "alice".to_string() };
		let token = jwt.create_jwt(&session).unwrap();
		assert_eq!(jwt.session_from_token(&token), Some(session));
	}

	#[test]
	fn token_signed_with_other_secret_is_rejected() {
		let session = Session { user_id: 7, username: "alice".to_string() };
		let token = JWT::new("one").create_jwt(&session).unwrap();
		assert_eq!(JWT::new("two").session_from_token(&token), None);
	}
}
