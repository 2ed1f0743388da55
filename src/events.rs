//! Progress notifications for the rendering side.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::GraphSnapshot;

pub const STAGE_STARTING: &str = "Starting wizard...";
pub const STAGE_FETCHING: &str = "Fetching top 20 quals...";
pub const STAGE_SUGGESTING: &str = "Suggest indexes...";
pub const STAGE_DONE: &str = "Suggestions computed";

/// A pipeline milestone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub stage: String,
    /// 0-100.
    pub percent: u8,
    pub at: DateTime<Utc>,
}

impl Progress {
    pub fn new(stage: impl Into<String>, percent: u8) -> Self {
        Self {
            stage: stage.into(),
            percent: percent.min(100),
            at: Utc::now(),
        }
    }
}

/// Observer of a wizard. Both callbacks default to doing nothing.
pub trait WizardListener: Send + Sync {
    fn on_progress(&self, _progress: &Progress) {}

    /// Called once per successful pass, after the tour is published.
    fn on_graph_updated(&self, _snapshot: &GraphSnapshot) {}
}
