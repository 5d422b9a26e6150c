use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::OnceCell;

static PLATFORM_CLIENT: OnceCell<Arc<PlatformClient>> = OnceCell::const_new();

const PLATFORM_BASE_URL: &str = "https://platform.nativeframe.com";

/// Outbound client for the streaming platform and the auth backend.
/// Pure request/response relays; no core state lives here.
#[derive(Debug)]
pub struct PlatformClient {
    client: Client,
    project_id: String,
    token: String,
    backend_endpoint: Option<String>,
}

impl PlatformClient {
    pub fn new(project_id: String, token: String, backend_endpoint: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("Failed to build reqwest client");

        Self {
            client,
            project_id,
            token,
            backend_endpoint,
        }
    }

    fn streams_url(&self) -> String {
        format!(
            "{}/program/api/v1/projects/{}/streams",
            PLATFORM_BASE_URL, self.project_id
        )
    }

    /// Create a stream on the platform from a prepared payload
    pub async fn create_stream(&self, payload: &Value) -> Result<Value, reqwest::Error> {
        self.client
            .post(self.streams_url())
            .header("Authorization", format!("Bearer {}", self.token))
            .json(payload)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    /// List the project's live streams
    pub async fn list_streams(&self) -> Result<Value, reqwest::Error> {
        self.client
            .get(self.streams_url())
            .header("Accept", "application/json")
            .header("Authorization", format!("Bearer {}", self.token))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    /// Request an access token from the auth backend.
    /// Returns None if no backend endpoint is configured.
    pub async fn request_auth_token(&self) -> Option<Result<Value, reqwest::Error>> {
        let backend = self.backend_endpoint.as_ref()?;
        // The auth API lives on the bare backend host, not the umbrella one
        let url = format!("{}/auth/v1/access-tokens", backend).replacen("umbrella.", "", 1);
        Some(
            async {
                self.client
                    .post(&url)
                    .header("Content-Type", "application/json")
                    .header("Authorization", format!("Bearer {}", self.token))
                    .send()
                    .await?
                    .error_for_status()?
                    .json()
                    .await
            }
            .await,
        )
    }
}

/// Initialize the global PlatformClient
pub fn init_platform_client(
    project_id: String,
    token: String,
    backend_endpoint: Option<String>,
) -> Result<(), &'static str> {
    let client = PlatformClient::new(project_id, token, backend_endpoint);
    PLATFORM_CLIENT
        .set(Arc::new(client))
        .map_err(|_| "PlatformClient already initialized")
}

/// Get the global PlatformClient instance
pub fn get_platform_client() -> Option<Arc<PlatformClient>> {
    PLATFORM_CLIENT.get().cloned()
}
