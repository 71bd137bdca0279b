//! REST API module.
//!
//! Handlers translate HTTP requests into registry calls and registry results into
//! status codes and JSON bodies. No business rules live here.

mod entries;
mod parties;
mod sub_parties;
mod vendors;

pub use entries::*;
pub use parties::*;
pub use sub_parties::*;
pub use vendors::*;

use axum::{
    extract::FromRequest,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;

/// JSON body extractor whose rejections use the application's error body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Successful response: a status code plus a JSON body.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub status: StatusCode,
    pub body: T,
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, AppError>;

/// 200 OK with `body`.
pub fn ok<T: Serialize>(body: T) -> ApiResult<T> {
    Ok(ApiResponse {
        status: StatusCode::OK,
        body,
    })
}

/// 201 Created with `body`.
pub fn created<T: Serialize>(body: T) -> ApiResult<T> {
    Ok(ApiResponse {
        status: StatusCode::CREATED,
        body,
    })
}
