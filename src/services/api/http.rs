use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use crate::config::ClientConfig;
use crate::errors::ApiError;
use crate::models::{
    Booking, BookingRequest, BookingStatus, PaymentMethod, PaymentUpdate, Rating, SearchFilters,
};
use crate::services::lifecycle::Decision;
use crate::session::SessionContext;

use super::BookingApi;

/// Reqwest-backed [`BookingApi`] talking to the booking backend over REST.
pub struct HttpBookingClient {
    base_url: String,
    http: reqwest::Client,
    session: Arc<dyn SessionContext>,
}

impl HttpBookingClient {
    pub fn new(config: &ClientConfig, session: Arc<dyn SessionContext>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            // the builder can only fail at TLS backend init
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
            session,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// A missing token short-circuits locally; no unauthenticated request
    /// ever goes out.
    fn bearer(&self) -> Result<String, ApiError> {
        self.session.token().ok_or(ApiError::Unauthorized)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        request.send().await.map_err(transport_error)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let token = self.bearer()?;
        let resp = self.send(self.http.get(self.url(path)).bearer_auth(&token)).await?;
        read_json(resp).await
    }

    async fn put_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, ApiError> {
        let token = self.bearer()?;
        let resp = self
            .send(self.http.put(self.url(path)).bearer_auth(&token).json(body))
            .await?;
        read_json(resp).await
    }
}

#[async_trait]
impl BookingApi for HttpBookingClient {
    async fn request_booking(&self, details: &BookingRequest) -> Result<Booking, ApiError> {
        let token = self.bearer()?;
        let resp = self
            .send(
                self.http
                    .post(self.url("/request"))
                    .bearer_auth(&token)
                    .json(details),
            )
            .await?;
        read_json(resp).await
    }

    async fn latest_booking(&self) -> Result<Option<Booking>, ApiError> {
        let token = self.bearer()?;
        let resp = self
            .send(self.http.get(self.url("/latest-booking")).bearer_auth(&token))
            .await?;
        // 404 here means "no booking yet", a normal outcome for new users
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        read_json(resp).await.map(Some)
    }

    async fn booking_status(&self, id: &str) -> Result<BookingStatus, ApiError> {
        #[derive(Deserialize)]
        struct StatusBody {
            status: BookingStatus,
        }
        let body: StatusBody = self.get_json(&format!("/status/{id}")).await?;
        Ok(body.status)
    }

    async fn respond(&self, id: &str, decision: Decision) -> Result<Booking, ApiError> {
        self.put_json(&format!("/respond/{id}"), &json!({ "status": decision }))
            .await
    }

    async fn complete_tour(&self, id: &str) -> Result<Booking, ApiError> {
        self.put_json(&format!("/complete/{id}"), &json!({})).await
    }

    async fn update_payment(&self, id: &str, update: &PaymentUpdate) -> Result<Booking, ApiError> {
        let token = self.bearer()?;
        let resp = self
            .send(
                self.http
                    .put(self.url(&format!("/payment/{id}")))
                    .bearer_auth(&token)
                    .json(update),
            )
            .await?;
        read_json(resp).await
    }

    async fn update_payment_method(
        &self,
        id: &str,
        method: PaymentMethod,
    ) -> Result<Booking, ApiError> {
        self.put_json(
            &format!("/payment-method/{id}"),
            &json!({ "paymentMethod": method }),
        )
        .await
    }

    async fn confirm_user_payment(&self, id: &str, rating: Rating) -> Result<Booking, ApiError> {
        self.put_json(
            &format!("/mark-user-payment/{id}"),
            &json!({ "rating": rating }),
        )
        .await
    }

    async fn guide_requests(&self) -> Result<Vec<Booking>, ApiError> {
        self.get_json("/requests").await
    }

    async fn all_requests(&self) -> Result<Vec<Booking>, ApiError> {
        self.get_json("/all-requests").await
    }

    async fn user_bookings(&self) -> Result<Vec<Booking>, ApiError> {
        self.get_json("/user-bookings").await
    }

    async fn search(&self, filters: &SearchFilters) -> Result<Vec<Booking>, ApiError> {
        let token = self.bearer()?;
        let resp = self
            .send(
                self.http
                    .get(self.url("/search"))
                    .bearer_auth(&token)
                    .query(&filters.to_query()),
            )
            .await?;
        read_json(resp).await
    }
}

fn transport_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Network(format!("request timed out: {err}"))
    } else {
        ApiError::Network(err.to_string())
    }
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let status = resp.status();
    if status.is_success() {
        resp.json::<T>().await.map_err(|e| ApiError::Server {
            status: status.as_u16(),
            message: format!("malformed response body: {e}"),
        })
    } else {
        let message = read_error_message(resp).await;
        Err(error_from_status(status, message))
    }
}

/// Pull a human-readable message out of the backend's JSON error body.
async fn read_error_message(resp: Response) -> String {
    match resp.json::<serde_json::Value>().await {
        Ok(body) => body
            .get("error")
            .or_else(|| body.get("message"))
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| body.to_string()),
        Err(_) => "no error detail".to_string(),
    }
}

fn error_from_status(status: StatusCode, message: String) -> ApiError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized,
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ApiError::Validation(message),
        StatusCode::NOT_FOUND => ApiError::NotFound(message),
        s => ApiError::Server {
            status: s.as_u16(),
            message,
        },
    }
}
