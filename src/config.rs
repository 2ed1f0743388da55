//! Wizard configuration.
//!
//! Usually deserialized from the JSON the dashboard stores for the widget:
//!
//! ```json
//! { "datasource": "wizard", "database": "bench",
//!   "solver": { "kind": "greedy" },
//!   "unresolved": { "policy": "penalize", "cost": 1000 } }
//! ```

use serde::{Deserialize, Serialize};

use crate::solver::SolverKind;
use crate::valuation::UnresolvedPolicy;
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardConfig {
    /// Name of a registered data source feeding the quals.
    pub datasource: String,
    /// Database the suggestion endpoint is scoped to.
    #[serde(default)]
    pub database: String,
    #[serde(default)]
    pub solver: SolverKind,
    #[serde(default)]
    pub unresolved: UnresolvedPolicy,
    /// Root of the suggestion web service, for the HTTP requester.
    #[serde(default)]
    pub suggest_url: Option<String>,
}

impl WizardConfig {
    pub fn new(datasource: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            datasource: datasource.into(),
            database: database.into(),
            solver: SolverKind::default(),
            unresolved: UnresolvedPolicy::default(),
            suggest_url: None,
        }
    }

    pub fn with_solver(mut self, solver: SolverKind) -> Self {
        self.solver = solver;
        self
    }

    pub fn with_unresolved(mut self, policy: UnresolvedPolicy) -> Self {
        self.unresolved = policy;
        self
    }

    pub fn with_suggest_url(mut self, url: impl Into<String>) -> Self {
        self.suggest_url = Some(url.into());
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.datasource.trim().is_empty() {
            return Err(Error::Config("datasource must not be empty".into()));
        }
        if self.database.contains('/') {
            return Err(Error::Config(format!("invalid database name '{}'", self.database)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WizardConfig::from_json(r#"{"datasource": "wizard"}"#).unwrap();
        assert_eq!(config.solver, SolverKind::Greedy);
        assert_eq!(config.unresolved, UnresolvedPolicy::Penalize { cost: 1000 });
        assert_eq!(config.database, "");
        assert!(config.suggest_url.is_none());
    }

    #[test]
    fn test_full_document() {
        let config = WizardConfig::from_json(
            r#"{
                "datasource": "wizard",
                "database": "bench",
                "solver": {"kind": "insertion", "seed": 3},
                "unresolved": {"policy": "zero"},
                "suggest_url": "http://localhost:8888"
            }"#,
        )
        .unwrap();
        assert_eq!(config.solver, SolverKind::Insertion { seed: Some(3) });
        assert_eq!(config.unresolved, UnresolvedPolicy::Zero);
        assert_eq!(config.suggest_url.as_deref(), Some("http://localhost:8888"));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(WizardConfig::from_json(r#"{"datasource": " "}"#), Err(Error::Config(_))));
        assert!(matches!(
            WizardConfig::from_json(r#"{"datasource": "w", "database": "a/b"}"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(WizardConfig::from_json("{}"), Err(Error::Json(_))));
    }
}
