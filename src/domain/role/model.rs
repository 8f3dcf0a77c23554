use serde_json::Value;

use crate::domain::User;

/// Opaque role payload returned by the role service for one user.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleResult(pub Value);

impl RoleResult {
    pub fn into_inner(self) -> Value {
        self.0
    }
}

/// A user together with the role the role service reported for it.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedUser {
    pub user: User,
    pub role: RoleResult,
}

/// Caller-supplied controls that make the role service fail or slow down.
///
/// Values are forwarded verbatim to every per-user lookup of a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulationOptions {
    pub error: Option<String>,
    pub latence: Option<String>,
}

impl SimulationOptions {
    /// Query pairs to append to a role lookup. Empty values are not forwarded.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        [("error", &self.error), ("latence", &self.latence)]
            .into_iter()
            .filter_map(|(key, value)| {
                value
                    .as_deref()
                    .filter(|v| !v.is_empty())
                    .map(|v| (key, v))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_options_forward_nothing() {
        assert!(SimulationOptions::default().query_pairs().is_empty());
    }

    #[test]
    fn both_options_forwarded_in_order() {
        let opts = SimulationOptions {
            error: Some("1".into()),
            latence: Some("250".into()),
        };
        assert_eq!(opts.query_pairs(), vec![("error", "1"), ("latence", "250")]);
    }

    #[test]
    fn empty_values_are_dropped() {
        let opts = SimulationOptions {
            error: Some(String::new()),
            latence: Some("100".into()),
        };
        assert_eq!(opts.query_pairs(), vec![("latence", "100")]);
    }
}
