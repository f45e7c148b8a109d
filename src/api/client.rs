//! HTTP client for the course-resource API.
//!
//! One `ApiClient` is created per process and reused for every request so
//! connection pooling applies. All operations return [`ApiError`] with the
//! failed URL attached; callers surface that text to the user as-is.

use futures_util::StreamExt;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::model::{
    CourseDetails, CourseListResponse, InsertLinkRequest, InsertResourceRequest, ResourceType,
};

use super::endpoints::Endpoints;
use super::error::ApiError;

const CONNECT_TIMEOUT_SECS: u64 = 10;
const READ_TIMEOUT_SECS: u64 = 30;

/// One local file attached to a resource upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    /// File name sent in the multipart part (and shown in the form).
    pub name: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

/// Client for every operation the views perform against the API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    endpoints: Endpoints,
}

impl ApiClient {
    /// Creates a client for the given endpoint table.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`]-style construction failure if the
    /// underlying HTTP client cannot be built.
    pub fn new(endpoints: Endpoints) -> Result<Self, ApiError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(READ_TIMEOUT_SECS))
            .gzip(true)
            .user_agent(concat!("coursefiles/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| ApiError::Network {
                url: endpoints.courses.clone(),
                source,
            })?;
        Ok(Self { client, endpoints })
    }

    /// Creates a client pointed at a single base URL (usual entry point).
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new).
    pub fn from_base(base: &str) -> Result<Self, ApiError> {
        Self::new(Endpoints::from_base(base))
    }

    /// The endpoint table this client resolves URLs against.
    #[must_use]
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Fetches one page of the course listing.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on network failure, non-2xx status, or a
    /// non-JSON body.
    #[instrument(skip(self), fields(page, search, faculty))]
    pub async fn list_courses(
        &self,
        page: u64,
        search: &str,
        faculty: Option<i64>,
    ) -> Result<CourseListResponse, ApiError> {
        let url = self.endpoints.list_url(page, search, faculty);
        self.get_json(&url).await
    }

    /// Fetches one course's details for one resource-type tab.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on network failure, non-2xx status, or a
    /// non-JSON body.
    #[instrument(skip(self), fields(course_id, resource_type = resource_type.code()))]
    pub async fn course_details(
        &self,
        course_id: &str,
        resource_type: ResourceType,
    ) -> Result<CourseDetails, ApiError> {
        let url = self.endpoints.details_url(course_id, resource_type);
        self.get_json(&url).await
    }

    /// Inserts a file-bearing resource: one multipart POST with exactly one
    /// JSON-encoded `metadata` part plus one `files` part per attached file.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] with the raw body on non-2xx, or a
    /// network error.
    #[instrument(skip(self, request, files), fields(course_id, files = files.len()))]
    pub async fn insert_resource(
        &self,
        course_id: &str,
        request: &InsertResourceRequest,
        files: &[UploadFile],
    ) -> Result<(), ApiError> {
        let url = self.endpoints.insert_resource_url(course_id);

        let metadata = serde_json::to_string(request)
            .map_err(|source| ApiError::decode(url.clone(), source))?;
        let mut form = Form::new().part("metadata", Part::text(metadata));
        for file in files {
            form = form.part(
                "files",
                Part::bytes(file.bytes.clone()).file_name(file.name.clone()),
            );
        }

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(&url, e))?;
        Self::check_status(&url, response).await.map(|_| ())
    }

    /// Inserts a link resource: one JSON POST of `{title, url}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] with the raw body on non-2xx, or a
    /// network error.
    #[instrument(skip(self, request), fields(course_id))]
    pub async fn insert_link(
        &self,
        course_id: &str,
        request: &InsertLinkRequest,
    ) -> Result<(), ApiError> {
        let url = self.endpoints.insert_link_url(course_id);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(&url, e))?;
        Self::check_status(&url, response).await.map(|_| ())
    }

    /// Fetches one file's raw bytes for the bundler.
    ///
    /// Streams the body so large files never need a second full copy.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on invalid URL, network failure, or non-2xx.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch_file(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        url::Url::parse(url).map_err(|_| ApiError::invalid_url(url))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(url, e))?;
        let response = Self::check_status(url, response).await?;

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| ApiError::from_reqwest(url, e))?;
            bytes.extend_from_slice(&chunk);
        }
        debug!(bytes = bytes.len(), "file fetched");
        Ok(bytes)
    }

    /// Shared GET-and-decode path for the JSON endpoints.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(url, e))?;
        let response = Self::check_status(url, response).await?;

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::from_reqwest(url, e))?;
        serde_json::from_str(&body).map_err(|source| ApiError::decode(url, source))
    }

    /// Promotes non-2xx responses to [`ApiError::Rejected`], preserving the
    /// raw body text for user display.
    async fn check_status(
        url: &str,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::rejected(url, status.as_u16(), body))
    }
}
