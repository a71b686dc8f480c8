use super::{ClientError, CollectionQuery, RecordPage, RemoteDataClient};
use crate::configuration::BackendSettings;
use crate::domain::Identity;
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;

/// HTTP implementation of [`RemoteDataClient`] against a
/// Manifest-style backend API.
pub struct ManifestClient {
    http: Client,
    base_url: String,
}

#[derive(serde::Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct SessionGrant {
    token: String,
}

/// Error payloads look like `{"message": "..."}`; fall back to the raw
/// body when they do not.
#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl ManifestClient {
    pub fn new(base_url: impl Into<String>, timeout: std::time::Duration) -> Self {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build the backend HTTP client");
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self { http, base_url }
    }

    pub fn from_settings(settings: &BackendSettings) -> Self {
        Self::new(settings.base_url.clone(), settings.timeout())
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn reject(&self, response: Response) -> ClientError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|e| e.message)
            .unwrap_or_else(|_| body.clone());

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ClientError::Auth(message),
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ClientError::Validation(message)
            }
            _ => ClientError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            },
        }
    }
}

#[async_trait]
impl RemoteDataClient for ManifestClient {
    async fn resolve_current_identity(&self, token: &str) -> Result<Identity, ClientError> {
        let response = self
            .http
            .get(self.url("auth/users/me"))
            .bearer_auth(token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(self.reject(response).await);
        }
        Ok(response.json::<Identity>().await?)
    }

    async fn login(&self, email: &str, password: &str) -> Result<String, ClientError> {
        let response = self
            .http
            .post(self.url("auth/users/login"))
            .json(&Credentials { email, password })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(self.reject(response).await);
        }
        let grant = response.json::<SessionGrant>().await?;
        Ok(grant.token)
    }

    async fn logout(&self, _token: &str) -> Result<(), ClientError> {
        // Bearer sessions are stateless; discarding the token ends the
        // session, there is nothing to revoke server-side.
        Ok(())
    }

    async fn query_collection(
        &self,
        token: &str,
        collection: &str,
        query: CollectionQuery,
    ) -> Result<RecordPage, ClientError> {
        let mut params: Vec<(String, String)> = query
            .filter
            .into_iter()
            .map(|(field, value)| (format!("filter[{field}]"), value))
            .collect();
        if let Some((field, order)) = query.sort {
            params.push(("sort".to_string(), field));
            params.push(("order".to_string(), order.as_str().to_string()));
        }
        if !query.include.is_empty() {
            params.push(("include".to_string(), query.include.join(",")));
        }

        let response = self
            .http
            .get(self.url(&format!("collections/{collection}")))
            .bearer_auth(token)
            .query(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(self.reject(response).await);
        }
        Ok(response.json::<RecordPage>().await?)
    }

    async fn create_record(
        &self,
        token: &str,
        collection: &str,
        fields: serde_json::Value,
    ) -> Result<serde_json::Value, ClientError> {
        let response = self
            .http
            .post(self.url(&format!("collections/{collection}")))
            .bearer_auth(token)
            .json(&fields)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(self.reject(response).await);
        }
        Ok(response.json::<serde_json::Value>().await?)
    }

    async fn delete_record(
        &self,
        token: &str,
        collection: &str,
        id: &str,
    ) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("collections/{collection}/{id}")))
            .bearer_auth(token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(self.reject(response).await);
        }
        Ok(())
    }
}
