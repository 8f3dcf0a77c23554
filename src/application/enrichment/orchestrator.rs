//! Attaches role data to a batch of users.
//!
//! Lookups run one at a time in list order. The first failed lookup aborts
//! the batch: later users are never queried and no partial list escapes.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, info};

use crate::domain::{
    EnrichedUser, EnrichmentError, RoleServiceClient, SimulationOptions, User,
};

pub struct RoleEnricher {
    client: Arc<dyn RoleServiceClient>,
}

impl RoleEnricher {
    pub fn new(client: Arc<dyn RoleServiceClient>) -> Self {
        Self { client }
    }

    /// Enrich every user, preserving input order exactly.
    ///
    /// `options` is forwarded unchanged to each lookup.
    pub async fn enrich_all(
        &self,
        users: Vec<User>,
        options: &SimulationOptions,
    ) -> Result<Vec<EnrichedUser>, EnrichmentError> {
        let started = Instant::now();
        let total = users.len();
        let mut enriched = Vec::with_capacity(total);

        for user in users {
            match self.client.fetch_role(user.id, options).await {
                Ok(role) => {
                    debug!(user_id = user.id, "Role attached");
                    enriched.push(EnrichedUser { user, role });
                }
                Err(source) => {
                    error!(
                        user_id = user.id,
                        completed = enriched.len(),
                        total,
                        error = %source,
                        "Role lookup failed, aborting enrichment"
                    );
                    record_batch("failed", started);
                    return Err(EnrichmentError {
                        user_id: user.id,
                        source,
                    });
                }
            }
        }

        record_batch("ok", started);
        info!(count = total, "Fetched {} users", total);
        Ok(enriched)
    }
}

fn record_batch(outcome: &'static str, started: Instant) {
    metrics::counter!("user_enrichment_total", "outcome" => outcome).increment(1);
    metrics::histogram!("user_enrichment_duration_seconds", "outcome" => outcome)
        .record(started.elapsed().as_secs_f64());
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use serde_json::{json, Value};
    use std::collections::HashSet;
    use std::sync::Mutex;

    use crate::domain::{RoleResult, RoleServiceError};

    /// Records every lookup; fails for the configured ids.
    #[derive(Default)]
    struct RecordingClient {
        failing: HashSet<i32>,
        calls: Mutex<Vec<(i32, SimulationOptions)>>,
    }

    impl RecordingClient {
        fn failing(ids: &[i32]) -> Self {
            Self {
                failing: ids.iter().copied().collect(),
                ..Default::default()
            }
        }

        fn called_ids(&self) -> Vec<i32> {
            self.calls.lock().unwrap().iter().map(|(id, _)| *id).collect()
        }
    }

    #[async_trait]
    impl RoleServiceClient for RecordingClient {
        async fn fetch_role(
            &self,
            user_id: i32,
            options: &SimulationOptions,
        ) -> Result<RoleResult, RoleServiceError> {
            self.calls.lock().unwrap().push((user_id, options.clone()));
            if self.failing.contains(&user_id) {
                return Err(RoleServiceError::Status { status: 500 });
            }
            Ok(RoleResult(json!({ "id": user_id, "role": format!("R{}", user_id) })))
        }

        async fn list_roles(&self) -> Result<Value, RoleServiceError> {
            Ok(json!([]))
        }
    }

    fn users(ids: &[i32]) -> Vec<User> {
        ids.iter()
            .map(|&id| User {
                id,
                name: format!("user{}", id),
                email: format!("user{}@example.com", id),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
            .collect()
    }

    #[tokio::test]
    async fn preserves_input_order() {
        let client = Arc::new(RecordingClient::default());
        let enricher = RoleEnricher::new(client.clone());

        let result = enricher
            .enrich_all(users(&[3, 1, 2, 1]), &SimulationOptions::default())
            .await
            .unwrap();

        let ids: Vec<i32> = result.iter().map(|e| e.user.id).collect();
        assert_eq!(ids, vec![3, 1, 2, 1]);
        assert_eq!(client.called_ids(), vec![3, 1, 2, 1]);
        assert_eq!(result[0].role.0["role"], "R3");
    }

    #[tokio::test]
    async fn empty_input_makes_no_calls() {
        let client = Arc::new(RecordingClient::default());
        let enricher = RoleEnricher::new(client.clone());

        let result = enricher
            .enrich_all(Vec::new(), &SimulationOptions::default())
            .await
            .unwrap();

        assert!(result.is_empty());
        assert!(client.called_ids().is_empty());
    }

    #[tokio::test]
    async fn first_failure_aborts_remaining_lookups() {
        let client = Arc::new(RecordingClient::failing(&[2]));
        let enricher = RoleEnricher::new(client.clone());

        let err = enricher
            .enrich_all(users(&[1, 2, 3, 4]), &SimulationOptions::default())
            .await
            .unwrap_err();

        assert_eq!(err.user_id, 2);
        assert_eq!(err.to_string(), "role service unavailable");
        assert_eq!(client.called_ids(), vec![1, 2]);
    }

    #[tokio::test]
    async fn failure_on_first_user_stops_immediately() {
        let client = Arc::new(RecordingClient::failing(&[1]));
        let enricher = RoleEnricher::new(client.clone());

        assert!(enricher
            .enrich_all(users(&[1, 2]), &SimulationOptions::default())
            .await
            .is_err());
        assert_eq!(client.called_ids(), vec![1]);
    }

    #[tokio::test]
    async fn options_forwarded_to_every_lookup() {
        let client = Arc::new(RecordingClient::default());
        let enricher = RoleEnricher::new(client.clone());
        let options = SimulationOptions {
            error: Some("1".into()),
            latence: Some("300".into()),
        };

        enricher
            .enrich_all(users(&[1, 2, 3]), &options)
            .await
            .unwrap();

        let calls = client.calls.lock().unwrap();
        assert_eq!(calls.len(), 3);
        assert!(calls.iter().all(|(_, opts)| *opts == options));
    }

    #[test]
    fn aborted_batch_records_duration() {
        use metrics_exporter_prometheus::PrometheusBuilder;

        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        let enricher = RoleEnricher::new(Arc::new(RecordingClient::failing(&[2])));
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        metrics::with_local_recorder(&recorder, || {
            runtime
                .block_on(enricher.enrich_all(users(&[1, 2]), &SimulationOptions::default()))
                .unwrap_err();
        });

        let rendered = handle.render();
        assert!(
            rendered.contains(r#"user_enrichment_duration_seconds_count{outcome="failed"} 1"#),
            "{rendered}"
        );
        assert!(
            rendered.contains(r#"user_enrichment_total{outcome="failed"} 1"#),
            "{rendered}"
        );
    }
}
