use eyre::{bail, Result};
use log::debug;
use reqwest::Client as ReqwestClient;
use reqwest::{Response, StatusCode};

use types::dashboard::DashboardData;
use types::domain::{AuthRequest, AuthResponse, ErrorBody};

const BASE_URL: &str = "http://localhost:8080";

pub struct Client {
    pub client: ReqwestClient,
    pub base_url: String,
    pub token: Option<String>,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    pub fn new() -> Self {
        Self::with_base_url(std::env::var("BASE_URL").unwrap_or_else(|_| BASE_URL.to_string()))
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            token: None,
        }
    }

    /// Posts a raw auth body and returns the status with the undecoded body.
    pub async fn auth_raw(&self, request: &AuthRequest) -> Result<(StatusCode, String)> {
        let url = format!("{}/auth", self.base_url);
        let response = self.client.post(url).json(request).send().await?;
        let status = response.status();
        Ok((status, response.text().await?))
    }

    pub async fn register(&mut self, request: AuthRequest) -> Result<AuthResponse> {
        let url = format!("{}/auth", self.base_url);
        let response = self.client.post(url).json(&request).send().await?;
        let auth = match response.status() {
            StatusCode::CREATED => response.json::<AuthResponse>().await?,
            _ => bail!(error_message(response).await),
        };
        self.token = Some(auth.token.clone());
        Ok(auth)
    }

    pub async fn login(&mut self, request: AuthRequest) -> Result<AuthResponse> {
        let url = format!("{}/auth", self.base_url);
        let response = self.client.post(url).json(&request).send().await?;
        let auth = match response.status() {
            StatusCode::OK => response.json::<AuthResponse>().await?,
            _ => bail!(error_message(response).await),
        };
        self.token = Some(auth.token.clone());
        Ok(auth)
    }

    pub async fn dashboard(&self) -> Result<DashboardData> {
        let url = format!("{}/merchant-data", self.base_url);
        let mut request = self.client.get(url);
        if let Some(token) = &self.token {
            request = request.header("X-Auth-Token", token);
        }
        let response = request.send().await?;
        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            _ => bail!(error_message(response).await),
        }
    }

    pub async fn preflight(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url, path);
        Ok(self
            .client
            .request(reqwest::Method::OPTIONS, url)
            .send()
            .await?)
    }
}

async fn error_message(response: Response) -> String {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    debug!("Request failed with {}: {}", status, text);
    match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => format!("{}: {}", status.as_u16(), body.error),
        Err(_) => format!("{}: {}", status.as_u16(), text),
    }
}
