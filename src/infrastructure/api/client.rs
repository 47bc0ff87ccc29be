//! Food backend HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, warn};

use super::dto::ErrorResponse;
use crate::domain::entities::{Food, FoodId, NewFood};
use crate::domain::errors::FoodError;
use crate::domain::ports::FoodRepositoryPort;

/// Default backend used by the development server.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3333";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!("foodboard/", env!("CARGO_PKG_VERSION"));

/// REST client for the `/foods` resource.
pub struct FoodApiClient {
    client: Client,
    base_url: String,
}

impl FoodApiClient {
    /// Creates new client with default base URL.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new() -> Result<Self, FoodError> {
        Self::with_base_url(DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }

    /// Creates client with custom base URL and request timeout.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FoodError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| FoodError::unexpected(format!("failed to create HTTP client: {e}")))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    /// Returns the base URL without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/foods", self.base_url)
    }

    fn item_url(&self, id: FoodId) -> String {
        format!("{}/foods/{id}", self.base_url)
    }

    fn map_send_error(e: &reqwest::Error) -> FoodError {
        warn!(error = %e, "Failed to reach food backend");
        if e.is_timeout() {
            FoodError::network("request timed out")
        } else if e.is_connect() {
            FoodError::network("failed to connect to food backend")
        } else {
            FoodError::network(e.to_string())
        }
    }

    async fn check_status(response: Response) -> Result<Response, FoodError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.json::<ErrorResponse>().await {
            Ok(error) => error.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unknown status")
                .to_string(),
        };

        Err(status_error(status, message))
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, FoodError> {
        response.json::<T>().await.map_err(|e| {
            warn!(error = %e, "Failed to parse food backend response");
            FoodError::decode(e.to_string())
        })
    }
}

fn status_error(status: StatusCode, message: String) -> FoodError {
    match status {
        StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
            FoodError::network("food backend is temporarily unavailable")
        }
        _ => FoodError::status(status.as_u16(), message),
    }
}

#[async_trait]
impl FoodRepositoryPort for FoodApiClient {
    async fn list_foods(&self) -> Result<Vec<Food>, FoodError> {
        let url = self.collection_url();
        debug!(url = %url, "GET foods");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Self::map_send_error(&e))?;

        Self::decode(Self::check_status(response).await?).await
    }

    async fn create_food(&self, food: NewFood) -> Result<Food, FoodError> {
        let url = self.collection_url();
        debug!(url = %url, name = %food.name, "POST food");

        let response = self
            .client
            .post(&url)
            .json(&food)
            .send()
            .await
            .map_err(|e| Self::map_send_error(&e))?;

        Self::decode(Self::check_status(response).await?).await
    }

    async fn update_food(&self, food: &Food) -> Result<Food, FoodError> {
        let url = self.item_url(food.id());
        debug!(url = %url, "PUT food");

        let response = self
            .client
            .put(&url)
            .json(food)
            .send()
            .await
            .map_err(|e| Self::map_send_error(&e))?;

        Self::decode(Self::check_status(response).await?).await
    }

    async fn delete_food(&self, id: FoodId) -> Result<(), FoodError> {
        let url = self.item_url(id);
        debug!(url = %url, "DELETE food");

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| Self::map_send_error(&e))?;

        Self::check_status(response).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    use crate::application::use_cases::{AddFoodUseCase, UpdateFoodUseCase};
    use crate::domain::entities::FoodChanges;

    const FOOD_JSON: &str =
        r#"{"id":5,"name":"Ao molho","description":"","price":19.9,"available":true,"image":""}"#;

    /// Raw HTTP request as received by [`serve_once`].
    struct CapturedRequest {
        head: String,
        body: String,
    }

    impl CapturedRequest {
        fn request_line(&self) -> &str {
            self.head.lines().next().unwrap_or_default()
        }

        fn json(&self) -> serde_json::Value {
            serde_json::from_str(&self.body).unwrap()
        }
    }

    async fn read_request(socket: &mut TcpStream) -> CapturedRequest {
        let mut data = Vec::new();
        let mut chunk = [0_u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            data.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&data);
            if let Some(end) = text.find("\r\n\r\n") {
                let length = text[..end]
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if data.len() >= end + 4 + length {
                    break;
                }
            }
        }

        let text = String::from_utf8(data).unwrap();
        let (head, body) = text.split_once("\r\n\r\n").unwrap_or((text.as_str(), ""));
        CapturedRequest {
            head: head.to_string(),
            body: body.to_string(),
        }
    }

    /// Answers a single request with `status` and `body`, returning the base URL
    /// and a handle resolving to the request it saw.
    async fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (String, JoinHandle<CapturedRequest>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;

            let mut response = format!("HTTP/1.1 {status}\r\nconnection: close\r\n");
            if !status.starts_with("204") {
                response.push_str("content-type: application/json\r\n");
                response.push_str(&format!("content-length: {}\r\n", body.len()));
            }
            response.push_str("\r\n");
            response.push_str(body);
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();

            request
        });

        (format!("http://{address}"), handle)
    }

    fn client_for(base_url: &str) -> FoodApiClient {
        FoodApiClient::with_base_url(base_url, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_client_creation() {
        let client = FoodApiClient::new();
        assert!(client.is_ok());
    }

    #[test]
    fn test_urls_trim_trailing_slash() {
        let client =
            FoodApiClient::with_base_url("http://api.local:3333/", Duration::from_secs(1)).unwrap();

        assert_eq!(client.base_url(), "http://api.local:3333");
        assert_eq!(client.collection_url(), "http://api.local:3333/foods");
        assert_eq!(client.item_url(FoodId(7)), "http://api.local:3333/foods/7");
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            status_error(StatusCode::NOT_FOUND, "Not Found".into()),
            FoodError::Status { status: 404, .. }
        ));
        assert!(matches!(
            status_error(StatusCode::SERVICE_UNAVAILABLE, String::new()),
            FoodError::Network { .. }
        ));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        let client =
            FoodApiClient::with_base_url("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();

        let err = client.list_foods().await.unwrap_err();

        assert!(err.is_backend_failure());
    }

    #[tokio::test]
    async fn test_list_decodes_foods() {
        let (base_url, server) = serve_once("200 OK", "[]").await;

        let foods = client_for(&base_url).list_foods().await.unwrap();

        assert!(foods.is_empty());
        assert!(server.await.unwrap().request_line().starts_with("GET /foods "));
    }

    #[tokio::test]
    async fn test_create_posts_available_food() {
        let (base_url, server) = serve_once("201 Created", FOOD_JSON).await;
        let use_case = AddFoodUseCase::new(Arc::new(client_for(&base_url)));

        let mut input = NewFood::new("Ao molho", 19.9);
        input.available = false;
        let created = use_case.execute(input).await.unwrap();

        assert_eq!(created.id(), FoodId(5));
        let request = server.await.unwrap();
        assert!(request.request_line().starts_with("POST /foods "));
        let body = request.json();
        assert_eq!(body["available"], serde_json::json!(true));
        assert_eq!(body["name"], serde_json::json!("Ao molho"));
        assert!(body.get("id").is_none());
    }

    #[tokio::test]
    async fn test_update_puts_merged_food() {
        let (base_url, server) = serve_once("200 OK", FOOD_JSON).await;
        let use_case = UpdateFoodUseCase::new(Arc::new(client_for(&base_url)));
        let editing = Food::new(5_u64, "A").with_price(19.9);

        let updated = use_case
            .execute(&editing, FoodChanges::default().name("Ao molho"))
            .await
            .unwrap();

        assert_eq!(updated.name(), "Ao molho");
        let request = server.await.unwrap();
        assert!(request.request_line().starts_with("PUT /foods/5 "));
        let body = request.json();
        assert_eq!(body["id"], serde_json::json!(5));
        assert_eq!(body["name"], serde_json::json!("Ao molho"));
        assert_eq!(body["price"], serde_json::json!(19.9));
    }

    #[tokio::test]
    async fn test_delete_ignores_success_body() {
        for (status, body) in [("200 OK", "deleted"), ("204 No Content", "")] {
            let (base_url, server) = serve_once(status, body).await;

            client_for(&base_url).delete_food(FoodId(3)).await.unwrap();

            assert!(server.await.unwrap().request_line().starts_with("DELETE /foods/3 "));
        }
    }

    #[tokio::test]
    async fn test_delete_missing_food_is_status_error() {
        let (base_url, _server) =
            serve_once("404 Not Found", r#"{"message":"Food not found"}"#).await;

        let err = client_for(&base_url).delete_food(FoodId(9)).await.unwrap_err();

        assert!(matches!(
            err,
            FoodError::Status { status: 404, ref message } if message == "Food not found"
        ));
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let (base_url, _server) = serve_once("200 OK", "[{").await;

        let err = client_for(&base_url).list_foods().await.unwrap_err();

        assert!(matches!(err, FoodError::Decode { .. }));
    }
}
