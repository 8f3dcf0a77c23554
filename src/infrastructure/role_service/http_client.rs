//! HTTP client for the external role service.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::{RoleResult, RoleServiceClient, RoleServiceError, SimulationOptions};

/// Talks to `GET {base_url}/roles`.
///
/// One `reqwest::Client` is shared by all requests so connections are reused.
#[derive(Clone)]
pub struct HttpRoleServiceClient {
    client: Client,
    base_url: String,
}

impl HttpRoleServiceClient {
    /// `timeout` bounds each individual call; `None` waits indefinitely.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, RoleServiceError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| RoleServiceError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn roles_url(&self) -> String {
        format!("{}/roles", self.base_url)
    }

    async fn get_json(
        &self,
        request: RequestBuilder,
        op: &'static str,
    ) -> Result<Value, RoleServiceError> {
        let started = Instant::now();
        let result = send(request).await;

        let outcome = if result.is_ok() { "ok" } else { "error" };
        metrics::counter!("role_service_requests_total", "op" => op, "outcome" => outcome)
            .increment(1);
        metrics::histogram!("role_service_request_duration_seconds", "op" => op)
            .record(started.elapsed().as_secs_f64());

        result
    }
}

async fn send(request: RequestBuilder) -> Result<Value, RoleServiceError> {
    let response = request
        .send()
        .await
        .map_err(|e| RoleServiceError::Transport(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(RoleServiceError::Status {
            status: status.as_u16(),
        });
    }

    response
        .json::<Value>()
        .await
        .map_err(|e| RoleServiceError::Decode(e.to_string()))
}

#[async_trait]
impl RoleServiceClient for HttpRoleServiceClient {
    async fn fetch_role(
        &self,
        user_id: i32,
        options: &SimulationOptions,
    ) -> Result<RoleResult, RoleServiceError> {
        let request = self
            .client
            .get(self.roles_url())
            .query(&[("id", user_id)])
            .query(&options.query_pairs());

        debug!(user_id, ?options, "Fetching role");
        self.get_json(request, "fetch_role")
            .await
            .map(RoleResult)
            .inspect_err(|e| warn!(user_id, error = %e, "Role lookup failed"))
    }

    async fn list_roles(&self) -> Result<Value, RoleServiceError> {
        let request = self.client.get(self.roles_url());
        self.get_json(request, "list_roles")
            .await
            .inspect_err(|e| warn!(error = %e, "Role list request failed"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use axum::extract::{Query, State};
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;

    type Seen = Arc<Mutex<Vec<HashMap<String, String>>>>;

    /// Stand-in role service: waits `latence` ms, fails when `error` is set,
    /// echoes the id otherwise.
    async fn roles(
        State(seen): State<Seen>,
        Query(params): Query<HashMap<String, String>>,
    ) -> Result<Json<Value>, StatusCode> {
        seen.lock().unwrap().push(params.clone());
        if let Some(ms) = params.get("latence").and_then(|v| v.parse().ok()) {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
        if params.contains_key("error") {
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
        match params.get("id") {
            Some(id) => Ok(Json(json!({ "userId": id, "role": "admin" }))),
            None => Ok(Json(json!([{ "name": "admin" }, { "name": "viewer" }]))),
        }
    }

    async fn spawn_role_service() -> (String, Seen) {
        let seen: Seen = Arc::default();
        let app = Router::new()
            .route("/roles", get(roles))
            .with_state(seen.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}/", addr), seen)
    }

    fn client(base: &str) -> HttpRoleServiceClient {
        HttpRoleServiceClient::new(base, Some(Duration::from_secs(5))).unwrap()
    }

    #[tokio::test]
    async fn fetch_role_sends_user_id() {
        let (base, seen) = spawn_role_service().await;

        let role = client(&base)
            .fetch_role(7, &SimulationOptions::default())
            .await
            .unwrap();

        assert_eq!(role.0, json!({ "userId": "7", "role": "admin" }));
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].get("id").map(String::as_str), Some("7"));
        assert!(!seen[0].contains_key("latence"));
    }

    #[tokio::test]
    async fn simulation_options_are_forwarded() {
        let (base, seen) = spawn_role_service().await;
        let options = SimulationOptions {
            error: None,
            latence: Some("15".into()),
        };

        client(&base).fetch_role(1, &options).await.unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0].get("latence").map(String::as_str), Some("15"));
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let (base, _) = spawn_role_service().await;
        let options = SimulationOptions {
            error: Some("1".into()),
            latence: None,
        };

        let err = client(&base).fetch_role(1, &options).await.unwrap_err();
        assert!(matches!(err, RoleServiceError::Status { status: 500 }));
    }

    #[tokio::test]
    async fn list_roles_passes_body_through() {
        let (base, _) = spawn_role_service().await;
        let roles = client(&base).list_roles().await.unwrap();
        assert_eq!(roles, json!([{ "name": "admin" }, { "name": "viewer" }]));
    }

    #[tokio::test]
    async fn unreachable_service_is_transport_error() {
        // Bind then drop to get a port nobody listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(&format!("http://{}", addr))
            .list_roles()
            .await
            .unwrap_err();
        assert!(matches!(err, RoleServiceError::Transport(_)));
    }

    #[tokio::test]
    async fn slow_lookup_times_out_as_transport_error() {
        let (base, seen) = spawn_role_service().await;
        let client = HttpRoleServiceClient::new(base, Some(Duration::from_millis(100))).unwrap();
        let options = SimulationOptions {
            error: None,
            latence: Some("2000".into()),
        };

        let err = client.fetch_role(1, &options).await.unwrap_err();

        assert!(matches!(err, RoleServiceError::Transport(_)), "{err:?}");
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn latency_within_timeout_succeeds() {
        let (base, _) = spawn_role_service().await;
        let client = HttpRoleServiceClient::new(base, Some(Duration::from_secs(5))).unwrap();
        let options = SimulationOptions {
            error: None,
            latence: Some("50".into()),
        };

        let role = client.fetch_role(3, &options).await.unwrap();
        assert_eq!(role.0["userId"], "3");
    }

    #[tokio::test]
    async fn timed_out_lookup_aborts_enrichment() {
        use crate::application::RoleEnricher;
        use crate::domain::User;
        use chrono::Utc;

        let (base, seen) = spawn_role_service().await;
        let client = HttpRoleServiceClient::new(base, Some(Duration::from_millis(100))).unwrap();
        let enricher = RoleEnricher::new(Arc::new(client));
        let users = (1..=3)
            .map(|id| User {
                id,
                name: format!("user{id}"),
                email: format!("user{id}@example.com"),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
            .collect();
        let options = SimulationOptions {
            error: None,
            latence: Some("2000".into()),
        };

        let err = enricher.enrich_all(users, &options).await.unwrap_err();

        assert_eq!(err.to_string(), "role service unavailable");
        assert_eq!(err.user_id, 1);
        assert!(matches!(err.source, RoleServiceError::Transport(_)));
        assert_eq!(seen.lock().unwrap().len(), 1);
    }
}
