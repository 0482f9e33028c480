//! HTTP Collection Client
//!
//! reqwest-backed implementation of [`CollectionApi`]. On wasm32 reqwest
//! goes through the browser's fetch, natively through hyper.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::error::{ApiError, ApiResult};
use super::query::{IndexAssignment, Page, PageQuery, Scope};
use super::traits::CollectionApi;
use crate::config::ClientConfig;
use crate::domain::{FieldError, Resource};

/// Single-object response body
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Body of a 422 response
#[derive(Debug, Deserialize)]
struct ValidationBody {
    #[serde(default)]
    errors: Vec<FieldError>,
}

#[derive(Serialize)]
struct ReorderBody<'a, Id> {
    items: &'a [IndexAssignment<Id>],
}

/// REST client shared by every collection
#[derive(Debug, Clone)]
pub struct HttpCollectionClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpCollectionClient {
    #[cfg(not(target_arch = "wasm32"))]
    const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let base_url = config
            .api_base_url
            .as_deref()
            .ok_or(ApiError::NotConfigured)?
            .trim_end_matches('/')
            .to_string();

        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder
            .timeout(Self::REQUEST_TIMEOUT)
            .user_agent(concat!("layana-admin/", env!("CARGO_PKG_VERSION")));
        let http = builder
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url,
            token: config.api_token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match &self.token {
            Some(token) => builder.header(reqwest::header::AUTHORIZATION, format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder, what: &str) -> ApiResult<Response> {
        let res = builder.send().await.map_err(map_reqwest_error)?;
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }

        let body = res.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), request = what, "API request failed");
        Err(match status {
            StatusCode::NOT_FOUND => ApiError::NotFound(what.to_string()),
            StatusCode::CONFLICT | StatusCode::BAD_REQUEST => ApiError::Rejected(body),
            StatusCode::UNPROCESSABLE_ENTITY => match serde_json::from_str::<ValidationBody>(&body) {
                Ok(parsed) if !parsed.errors.is_empty() => ApiError::Validation(parsed.errors),
                _ => ApiError::Rejected(body),
            },
            s => ApiError::Http {
                status: s.as_u16(),
                body,
            },
        })
    }

    async fn send_json<R: DeserializeOwned>(&self, builder: RequestBuilder, what: &str) -> ApiResult<R> {
        let res = self.send(builder, what).await?;
        res.json::<R>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

fn map_reqwest_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Timeout
    } else if e.is_decode() {
        ApiError::Decode(e.to_string())
    } else {
        ApiError::Transport(e.to_string())
    }
}

/// Body of a reorder request: the assignments plus the scope key, if any
fn reorder_body<Id: Serialize>(
    assignments: &[IndexAssignment<Id>],
    scope: Option<Scope>,
) -> ApiResult<serde_json::Value> {
    let mut body = serde_json::to_value(ReorderBody { items: assignments })
        .map_err(|e| ApiError::Decode(e.to_string()))?;
    if let (Some(scope), Some(map)) = (scope, body.as_object_mut()) {
        map.insert(scope.key.to_string(), scope.id.into());
    }
    Ok(body)
}

#[async_trait(?Send)]
impl<T: Resource> CollectionApi<T> for HttpCollectionClient {
    async fn list_page(&self, query: &PageQuery) -> ApiResult<Page<T>> {
        debug!(collection = T::COLLECTION, page = query.page, limit = query.page_size, "list page");
        let builder = self.request(Method::GET, T::COLLECTION).query(&query.to_pairs());
        self.send_json(builder, T::COLLECTION).await
    }

    async fn reorder(
        &self,
        assignments: &[IndexAssignment<T::Id>],
        scope: Option<Scope>,
    ) -> ApiResult<()> {
        debug!(collection = T::COLLECTION, rows = assignments.len(), "reorder");
        let body = reorder_body(assignments, scope)?;
        let path = format!("{}/reorder", T::COLLECTION);
        self.send(self.request(Method::PUT, &path).json(&body), &path).await?;
        Ok(())
    }

    async fn get(&self, id: T::Id) -> ApiResult<T> {
        let path = format!("{}/{}", T::COLLECTION, id);
        let envelope: Envelope<T> = self.send_json(self.request(Method::GET, &path), &path).await?;
        Ok(envelope.data)
    }

    async fn create(&self, draft: &T::Draft) -> ApiResult<T> {
        let builder = self.request(Method::POST, T::COLLECTION).json(draft);
        let envelope: Envelope<T> = self.send_json(builder, T::COLLECTION).await?;
        Ok(envelope.data)
    }

    async fn update(&self, id: T::Id, draft: &T::Draft) -> ApiResult<T> {
        let path = format!("{}/{}", T::COLLECTION, id);
        let builder = self.request(Method::PUT, &path).json(draft);
        let envelope: Envelope<T> = self.send_json(builder, &path).await?;
        Ok(envelope.data)
    }

    async fn delete(&self, id: T::Id) -> ApiResult<()> {
        let path = format!("{}/{}", T::COLLECTION, id);
        self.send(self.request(Method::DELETE, &path), &path).await?;
        Ok(())
    }
}
