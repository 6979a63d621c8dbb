//! HTTP client for the task service.
//!
//! Every outbound request attaches `Authorization: Bearer <token>` when the
//! session store holds a token; anonymous requests omit the header. Failures
//! are classified into the [`ApiError`] taxonomy; reacting to them (notably
//! tearing down the session on 401) is the caller's job, never the client's.

pub mod error;

use serde::{Deserialize, Serialize};

use crate::session::{SessionStore, UserRecord};
use crate::tasks::{Task, TaskDraft, TaskQuery, TaskRecord};
pub use error::{ApiError, ApiResult};

/// Standard User-Agent header for taskdeck API requests.
pub const USER_AGENT: &str = concat!("taskdeck/", env!("CARGO_PKG_VERSION"));

/// Successful auth payload, shared by login and register.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserRecord,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RegisterRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct TaskListResponse {
    #[serde(default)]
    tasks: Vec<TaskRecord>,
}

/// Authenticated client for the task service REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    /// Creates a client for `base_url`, reading tokens from `session`.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: &str, session: SessionStore, timeout_secs: u32) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if timeout_secs > 0 {
            builder = builder.timeout(std::time::Duration::from_secs(u64::from(timeout_secs)));
        }
        let http = builder.build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    /// Exchanges credentials for a token and user.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<AuthResponse> {
        let response = self
            .request(reqwest::Method::POST, "/api/auth/login")
            .json(&LoginRequest { email, password })
            .send()
            .await?;
        Self::check(response).await?.json().await.map_err(Into::into)
    }

    /// Creates an account; on success behaves exactly like login.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> ApiResult<AuthResponse> {
        let response = self
            .request(reqwest::Method::POST, "/api/auth/register")
            .json(&RegisterRequest {
                name,
                email,
                password,
            })
            .send()
            .await?;
        Self::check(response).await?.json().await.map_err(Into::into)
    }

    /// Fetches tasks matching `query`, normalizing every record's
    /// identifier at ingestion.
    pub async fn list_tasks(&self, query: &TaskQuery) -> ApiResult<Vec<Task>> {
        let response = self
            .request(reqwest::Method::GET, "/api/tasks")
            .query(&query.query_pairs())
            .send()
            .await?;
        let payload: TaskListResponse = Self::check(response).await?.json().await?;

        let tasks = payload
            .tasks
            .into_iter()
            .map(|record| record.normalize().map_err(ApiError::Parse))
            .collect::<ApiResult<Vec<Task>>>()?;
        tracing::debug!(count = tasks.len(), "fetched tasks");
        Ok(tasks)
    }

    /// Submits a new task.
    pub async fn create_task(&self, draft: &TaskDraft) -> ApiResult<Task> {
        let response = self
            .request(reqwest::Method::POST, "/api/tasks")
            .json(draft)
            .send()
            .await?;
        let record: TaskRecord = Self::check(response).await?.json().await?;
        record.normalize().map_err(ApiError::Parse)
    }

    /// Replaces an existing task's fields.
    pub async fn update_task(&self, id: &str, draft: &TaskDraft) -> ApiResult<Task> {
        let response = self
            .request(reqwest::Method::PUT, &format!("/api/tasks/{id}"))
            .json(draft)
            .send()
            .await?;
        let record: TaskRecord = Self::check(response).await?.json().await?;
        record.normalize().map_err(ApiError::Parse)
    }

    /// Deletes a task. No response body is required.
    pub async fn delete_task(&self, id: &str) -> ApiResult<()> {
        let response = self
            .request(reqwest::Method::DELETE, &format!("/api/tasks/{id}"))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Builds a request with the standard headers and, when the session
    /// holds one, the bearer token.
    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(%method, %url, "request");
        let mut builder = self
            .http
            .request(method, url)
            .header(reqwest::header::USER_AGENT, USER_AGENT);
        if let Some(token) = self.session.token() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Classifies non-success responses into the error taxonomy.
    async fn check(response: reqwest::Response) -> ApiResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let err = ApiError::from_status(status.as_u16(), &body);
        tracing::warn!(%status, error = %err, "request failed");
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json_string, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::tasks::{StatusFilter, TaskStatus};

    fn anonymous_session(dir: &tempfile::TempDir) -> SessionStore {
        let store = SessionStore::with_path(dir.path().join("session.json"));
        store.initialize();
        store
    }

    fn authenticated_session(dir: &tempfile::TempDir) -> SessionStore {
        let store = anonymous_session(dir);
        store
            .login(
                UserRecord {
                    id: "u1".to_string(),
                    name: "Ada".to_string(),
                    email: "ada@example.com".to_string(),
                },
                "tok-123".to_string(),
            )
            .unwrap();
        store
    }

    fn client(server: &MockServer, session: SessionStore) -> ApiClient {
        ApiClient::new(&server.uri(), session, 5).unwrap()
    }

    /// Test: after login, every call carries `Authorization: Bearer <token>`.
    #[tokio::test]
    async fn test_authenticated_call_carries_bearer_token() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();

        Mock::given(method("GET"))
            .and(path("/api/tasks"))
            .and(header("authorization", "Bearer tok-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "tasks": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server, authenticated_session(&dir));
        client.list_tasks(&TaskQuery::default()).await.unwrap();
    }

    /// Test: anonymous calls omit the Authorization header entirely.
    #[tokio::test]
    async fn test_anonymous_call_omits_authorization_header() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();

        Mock::given(method("GET"))
            .and(path("/api/tasks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "tasks": []
            })))
            .mount(&server)
            .await;

        let client = client(&server, anonymous_session(&dir));
        client.list_tasks(&TaskQuery::default()).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(!requests[0].headers.contains_key("authorization"));
    }

    /// Test: filter and search land as `status=completed&search=milk`.
    #[tokio::test]
    async fn test_list_sends_filter_and_search_params() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();

        Mock::given(method("GET"))
            .and(path("/api/tasks"))
            .and(query_param("status", "completed"))
            .and(query_param("search", "milk"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "tasks": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server, authenticated_session(&dir));
        let query = TaskQuery {
            status: StatusFilter::Only(TaskStatus::Completed),
            search: "milk".to_string(),
        };
        client.list_tasks(&query).await.unwrap();
    }

    /// Test: records carrying only the legacy `_id` come back with a
    /// canonical non-empty id.
    #[tokio::test]
    async fn test_list_normalizes_legacy_identifier() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();

        Mock::given(method("GET"))
            .and(path("/api/tasks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "tasks": [
                    {"_id": "legacy-1", "title": "Buy milk", "description": "2% milk",
                     "status": "pending", "createdAt": "2026-08-01T12:00:00Z"},
                    {"id": "plain-2", "title": "Walk dog", "description": "evening",
                     "status": "in-progress"}
                ]
            })))
            .mount(&server)
            .await;

        let client = client(&server, authenticated_session(&dir));
        let tasks = client.list_tasks(&TaskQuery::default()).await.unwrap();
        assert_eq!(tasks.len(), 2);
        assert!(tasks.iter().all(|t| !t.id.is_empty()));
        assert_eq!(tasks[0].id, "legacy-1");
        assert_eq!(tasks[1].id, "plain-2");
        assert_eq!(tasks[1].status, TaskStatus::InProgress);
    }

    /// Test: a 401 response classifies as Auth; the client does not touch
    /// the session itself.
    #[tokio::test]
    async fn test_401_classifies_as_auth_and_session_untouched() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();

        Mock::given(method("GET"))
            .and(path("/api/tasks"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "message": "Token expired"
            })))
            .mount(&server)
            .await;

        let session = authenticated_session(&dir);
        let client = client(&server, session.clone());
        let err = client.list_tasks(&TaskQuery::default()).await.unwrap_err();
        assert!(err.is_auth());
        assert_eq!(session.status(), crate::session::SessionStatus::Authenticated);
    }

    /// Test: a structured validation body surfaces its first message.
    #[tokio::test]
    async fn test_create_surfaces_first_validation_message() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();

        Mock::given(method("POST"))
            .and(path("/api/tasks"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "errors": [{"msg": "Title is required"}]
            })))
            .mount(&server)
            .await;

        let client = client(&server, authenticated_session(&dir));
        let err = client.create_task(&TaskDraft::default()).await.unwrap_err();
        assert_eq!(err.first_validation_message(), Some("Title is required"));
    }

    /// Test: login posts the credentials and returns token plus user.
    #[tokio::test]
    async fn test_login_round_trip() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();

        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .and(body_json_string(
                r#"{"email":"ada@example.com","password":"hunter2!"}"#,
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token": "tok-123",
                "user": {"id": "u1", "name": "Ada", "email": "ada@example.com"}
            })))
            .mount(&server)
            .await;

        let client = client(&server, anonymous_session(&dir));
        let auth = client.login("ada@example.com", "hunter2!").await.unwrap();
        assert_eq!(auth.token, "tok-123");
        assert_eq!(auth.user.name, "Ada");
    }

    /// Test: an unreachable server classifies as Network, not Server.
    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        let dir = tempfile::tempdir().unwrap();
        let session = anonymous_session(&dir);
        // Port 9 (discard) is never listening in the test environment.
        let client = ApiClient::new("http://127.0.0.1:9", session, 1).unwrap();

        let err = client.list_tasks(&TaskQuery::default()).await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)), "got {err:?}");
    }

    /// Test: delete hits the task path and succeeds on an empty 200.
    #[tokio::test]
    async fn test_delete_task() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();

        Mock::given(method("DELETE"))
            .and(path("/api/tasks/abc"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server, authenticated_session(&dir));
        client.delete_task("abc").await.unwrap();
    }
}
