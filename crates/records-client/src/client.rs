//! Reqwest-backed client for the `/api` surface.
//!
//! The client owns transport details only: URL building, JSON encoding and
//! mapping non-2xx answers onto [`ClientError::Api`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::{ApiErrorBody, ClientError};
use crate::models::{
    AgeStats, CountStats, LoginInput, LoginReply, MessageReply, Pet, PetInput, PetUpdate,
    SignupInput, SignupReply, Student, StudentInput, StudentUpdate, User, UserInput, UserUpdate,
};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// The two account exchanges, split out so flows can run against a fake.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountApi: Send + Sync {
    /// One signup step.
    async fn signup(&self, input: &SignupInput) -> Result<SignupReply, ClientError>;

    /// One login step.
    async fn login(&self, input: &LoginInput) -> Result<LoginReply, ClientError>;
}

/// Typed client bound to one API base URL.
///
/// # Examples
/// ```
/// use records_client::RecordsClient;
///
/// let client = RecordsClient::new("http://localhost:5000").expect("valid URL");
/// assert_eq!(client.base_url().as_str(), "http://localhost:5000/");
/// ```
#[derive(Debug, Clone)]
pub struct RecordsClient {
    http: Client,
    base: Url,
}

impl RecordsClient {
    /// Build a client for `base_url` with a ten second request timeout.
    ///
    /// # Errors
    /// Returns [`ClientError::InvalidUrl`] when `base_url` is not an absolute
    /// HTTP URL, and [`ClientError::Transport`] when the HTTP client cannot
    /// be built.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Build a client with an explicit request timeout.
    ///
    /// # Errors
    /// As for [`RecordsClient::new`].
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let base = Url::parse(base_url.trim())
            .map_err(|err| ClientError::invalid_url(base_url, err.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::invalid_url(base_url, "URL cannot carry a path"));
        }
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ClientError::transport(&err))?;
        Ok(Self { http, base })
    }

    /// Base URL every request path is appended to.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::invalid_url(self.base.as_str(), "URL cannot carry a path"))?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, ClientError> {
        let url = self.endpoint(segments)?;
        debug!(%method, %url, "api request");
        Ok(self.http.request(method, url))
    }

    async fn send<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ClientError> {
        let response = builder
            .send()
            .await
            .map_err(|err| ClientError::transport(&err))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| ClientError::transport(&err))?;
        if !status.is_success() {
            return Err(api_error(status.as_u16(), &body));
        }
        serde_json::from_slice(&body).map_err(|err| ClientError::decode(err.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ClientError> {
        Self::send(self.request(Method::GET, segments)?).await
    }

    async fn with_body<B, T>(&self, method: Method, segments: &[&str], body: &B) -> Result<T, ClientError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        Self::send(self.request(method, segments)?.json(body)).await
    }

    async fn delete(&self, segments: &[&str]) -> Result<MessageReply, ClientError> {
        Self::send(self.request(Method::DELETE, segments)?).await
    }

    /// `GET /api/students`.
    ///
    /// # Errors
    /// Any [`ClientError`].
    pub async fn list_students(&self) -> Result<Vec<Student>, ClientError> {
        self.get(&["students"]).await
    }

    /// `GET /api/students/{id}`.
    ///
    /// # Errors
    /// Any [`ClientError`]; an unknown id is an API 404.
    pub async fn get_student(&self, id: &str) -> Result<Student, ClientError> {
        self.get(&["students", id]).await
    }

    /// `POST /api/students`.
    ///
    /// # Errors
    /// Any [`ClientError`].
    pub async fn create_student(&self, input: &StudentInput) -> Result<Student, ClientError> {
        self.with_body(Method::POST, &["students"], input).await
    }

    /// `PUT /api/students/{id}`.
    ///
    /// # Errors
    /// Any [`ClientError`].
    pub async fn replace_student(&self, id: &str, input: &StudentInput) -> Result<Student, ClientError> {
        self.with_body(Method::PUT, &["students", id], input).await
    }

    /// `PATCH /api/students/{id}`.
    ///
    /// # Errors
    /// Any [`ClientError`].
    pub async fn update_student(&self, id: &str, update: &StudentUpdate) -> Result<Student, ClientError> {
        self.with_body(Method::PATCH, &["students", id], update).await
    }

    /// `DELETE /api/students/{id}`.
    ///
    /// # Errors
    /// Any [`ClientError`].
    pub async fn delete_student(&self, id: &str) -> Result<MessageReply, ClientError> {
        self.delete(&["students", id]).await
    }

    /// `GET /api/users`, optionally filtered by a username fragment.
    ///
    /// # Errors
    /// Any [`ClientError`].
    pub async fn list_users(&self, search: Option<&str>) -> Result<Vec<User>, ClientError> {
        let mut builder = self.request(Method::GET, &["users"])?;
        if let Some(search) = search {
            builder = builder.query(&[("search", search)]);
        }
        Self::send(builder).await
    }

    /// `GET /api/users/{id}`.
    ///
    /// # Errors
    /// Any [`ClientError`].
    pub async fn get_user(&self, id: &str) -> Result<User, ClientError> {
        self.get(&["users", id]).await
    }

    /// `GET /api/users/{id}/pets`.
    ///
    /// # Errors
    /// Any [`ClientError`].
    pub async fn user_pets(&self, id: &str) -> Result<Vec<Pet>, ClientError> {
        self.get(&["users", id, "pets"]).await
    }

    /// `POST /api/users`.
    ///
    /// # Errors
    /// Any [`ClientError`].
    pub async fn create_user(&self, input: &UserInput) -> Result<User, ClientError> {
        self.with_body(Method::POST, &["users"], input).await
    }

    /// `PUT /api/users/{id}`.
    ///
    /// # Errors
    /// Any [`ClientError`].
    pub async fn replace_user(&self, id: &str, input: &UserInput) -> Result<User, ClientError> {
        self.with_body(Method::PUT, &["users", id], input).await
    }

    /// `PATCH /api/users/{id}`.
    ///
    /// # Errors
    /// Any [`ClientError`].
    pub async fn update_user(&self, id: &str, update: &UserUpdate) -> Result<User, ClientError> {
        self.with_body(Method::PATCH, &["users", id], update).await
    }

    /// `DELETE /api/users/{id}`.
    ///
    /// # Errors
    /// Any [`ClientError`].
    pub async fn delete_user(&self, id: &str) -> Result<MessageReply, ClientError> {
        self.delete(&["users", id]).await
    }

    /// `GET /api/pets`, optionally limited to one owner.
    ///
    /// # Errors
    /// Any [`ClientError`].
    pub async fn list_pets(&self, owner: Option<&str>) -> Result<Vec<Pet>, ClientError> {
        let mut builder = self.request(Method::GET, &["pets"])?;
        if let Some(owner) = owner {
            builder = builder.query(&[("userId", owner)]);
        }
        Self::send(builder).await
    }

    /// `GET /api/pets/{id}`.
    ///
    /// # Errors
    /// Any [`ClientError`].
    pub async fn get_pet(&self, id: &str) -> Result<Pet, ClientError> {
        self.get(&["pets", id]).await
    }

    /// `POST /api/pets`.
    ///
    /// # Errors
    /// Any [`ClientError`]; an unknown owner is an API 400 naming `ownerId`.
    pub async fn create_pet(&self, input: &PetInput) -> Result<Pet, ClientError> {
        self.with_body(Method::POST, &["pets"], input).await
    }

    /// `PUT /api/pets/{id}`.
    ///
    /// # Errors
    /// Any [`ClientError`].
    pub async fn replace_pet(&self, id: &str, input: &PetInput) -> Result<Pet, ClientError> {
        self.with_body(Method::PUT, &["pets", id], input).await
    }

    /// `PATCH /api/pets/{id}`.
    ///
    /// # Errors
    /// Any [`ClientError`].
    pub async fn update_pet(&self, id: &str, update: &PetUpdate) -> Result<Pet, ClientError> {
        self.with_body(Method::PATCH, &["pets", id], update).await
    }

    /// `DELETE /api/pets/{id}`.
    ///
    /// # Errors
    /// Any [`ClientError`].
    pub async fn delete_pet(&self, id: &str) -> Result<MessageReply, ClientError> {
        self.delete(&["pets", id]).await
    }

    /// `GET /api/stats/users/count`.
    ///
    /// # Errors
    /// Any [`ClientError`].
    pub async fn user_count(&self) -> Result<CountStats, ClientError> {
        self.get(&["stats", "users", "count"]).await
    }

    /// `GET /api/stats/users/ages`.
    ///
    /// # Errors
    /// Any [`ClientError`].
    pub async fn user_ages(&self) -> Result<AgeStats, ClientError> {
        self.get(&["stats", "users", "ages"]).await
    }

    /// `GET /api/stats/pets/count`.
    ///
    /// # Errors
    /// Any [`ClientError`].
    pub async fn pet_count(&self) -> Result<CountStats, ClientError> {
        self.get(&["stats", "pets", "count"]).await
    }

    /// `GET /api/message`.
    ///
    /// # Errors
    /// Any [`ClientError`].
    pub async fn message(&self) -> Result<MessageReply, ClientError> {
        self.get(&["message"]).await
    }

    /// `POST /api/data`; the server answers `{"received": body}`.
    ///
    /// # Errors
    /// Any [`ClientError`].
    pub async fn echo(&self, body: &Value) -> Result<Value, ClientError> {
        self.with_body(Method::POST, &["data"], body).await
    }
}

#[async_trait]
impl AccountApi for RecordsClient {
    async fn signup(&self, input: &SignupInput) -> Result<SignupReply, ClientError> {
        self.with_body(Method::POST, &["signup"], input).await
    }

    async fn login(&self, input: &LoginInput) -> Result<LoginReply, ClientError> {
        self.with_body(Method::POST, &["login"], input).await
    }
}

fn api_error(status: u16, body: &[u8]) -> ClientError {
    let body = serde_json::from_slice::<ApiErrorBody>(body).unwrap_or_else(|_| ApiErrorBody {
        code: "unknown".to_owned(),
        message: String::from_utf8_lossy(body).trim().to_owned(),
        trace_id: None,
        details: None,
    });
    ClientError::Api { status, body }
}
