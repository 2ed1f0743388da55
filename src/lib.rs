//! # qualgraph: Index Suggestion Wizard
//!
//! Builds a graph over the predicates ("quals") of a workload and orders it
//! so that the indexes covering the most predicates are explored first.
//!
//! ## Pipeline
//!
//! 1. **Append**: each `QualBatch` becomes a predicate node
//! 2. **Link**: pairwise merge-join of sorted qual lists (`linker`)
//! 3. **Value**: price complete links, defer the others to a suggestion request (`valuation`)
//! 4. **Solve**: order the nodes into a tour from the start node (`solver`)
//! 5. **Publish**: snapshot + tour to listeners, then hand off suggestion requests
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use qualgraph::{DataSource, DataSourceRegistry, Qual, QualBatch, Wizard, WizardConfig};
//!
//! # async fn example() -> qualgraph::Result<()> {
//! let registry: DataSourceRegistry = [DataSource::new("wizard")].into_iter().collect();
//! let mut wizard = Wizard::in_memory(WizardConfig::new("wizard", "bench"), &registry)?;
//!
//! let batch = QualBatch::new(1, 42, "aid = ?")
//!     .with_qual(Qual::new(16384, 1, 96, 42).with_indexams([403]));
//! let tour = wizard.update(vec![batch]).await?;
//!
//! for link in tour.links() {
//!     println!("{} -> {} ({:?})", link.source, link.target, link.value);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Suggestion Requesters
//!
//! | Requester | Feature | Description |
//! |-----------|---------|-------------|
//! | Memory | (default) | Records requests for testing/embedding |
//! | Noop | (default) | Drops requests |
//! | Http | `http` | POSTs to `{suggest_url}/database/{db}/suggest/` |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod linker;
pub mod valuation;
pub mod solver;
pub mod suggest;
pub mod datasource;
pub mod config;
pub mod events;
pub mod export;
pub mod logging;

use std::sync::Arc;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    Qual, QualList, QualBatch, Oid,
    Node, NodeId, NodeKind, ShallowNode,
    Link, OverlapEntry, MissingQual,
    Tour, QualGraph, GraphSnapshot,
};

// ============================================================================
// Re-exports: Pipeline
// ============================================================================

pub use solver::{PathSolver, SolverKind, CostModel, GreedySolver, InsertionSolver};
pub use valuation::UnresolvedPolicy;
pub use suggest::{SuggestionRequester, SuggestionRequest, MemoryRequester, NoopRequester};
#[cfg(feature = "http")]
pub use suggest::HttpRequester;
pub use datasource::{DataSource, DataSourceRegistry};
pub use config::WizardConfig;
pub use events::{Progress, WizardListener};

// ============================================================================
// Graph controller
// ============================================================================

/// The primary entry point. A `Wizard` owns the qual graph and runs the
/// link → value → solve pipeline on every new batch of quals.
///
/// `update` takes `&mut self`: two passes can never run on the same graph
/// at once.
pub struct Wizard<R: SuggestionRequester> {
    config: WizardConfig,
    datasource: DataSource,
    graph: QualGraph,
    shortest_path: Tour,
    solver: Box<dyn PathSolver>,
    cost: CostModel,
    requester: R,
    listeners: Vec<Arc<dyn WizardListener>>,
    stage: String,
    progress: u8,
}

impl<R: SuggestionRequester> Wizard<R> {
    /// Create a wizard bound to a registered data source.
    ///
    /// Fails with [`Error::ContentSourceNotFound`] when `config.datasource`
    /// is not in `registry`.
    pub fn new(config: WizardConfig, registry: &DataSourceRegistry, requester: R) -> Result<Self> {
        config.validate()?;
        let datasource = registry.resolve(&config.datasource)?.clone();
        let solver = config.solver.build();
        tracing::debug!(
            datasource = %datasource.name,
            solver = solver.name(),
            requester = requester.name(),
            "wizard created"
        );
        Ok(Self {
            solver,
            cost: CostModel::new(config.unresolved),
            config,
            datasource,
            graph: QualGraph::new(),
            shortest_path: Tour::new(),
            requester,
            listeners: Vec::new(),
            stage: events::STAGE_STARTING.to_string(),
            progress: 0,
        })
    }

    /// Create a wizard from its JSON configuration.
    pub fn from_json(json: &str, registry: &DataSourceRegistry, requester: R) -> Result<Self> {
        Self::new(WizardConfig::from_json(json)?, registry, requester)
    }

    /// Register an observer for progress and graph updates.
    pub fn subscribe(&mut self, listener: Arc<dyn WizardListener>) {
        self.listeners.push(listener);
    }

    /// Replace the path solver.
    pub fn set_solver(&mut self, solver: Box<dyn PathSolver>) {
        self.solver = solver;
    }

    /// The data source started fetching quals.
    pub fn start_load(&mut self) {
        self.report(events::STAGE_FETCHING, 0);
    }

    /// Run one pass over a new set of batches and return the published tour.
    ///
    /// On error the graph is restored to its state before the call.
    pub async fn update(&mut self, batches: Vec<QualBatch>) -> Result<&Tour> {
        let span = tracing::debug_span!("wizard_update", batches = batches.len());
        self.report(events::STAGE_SUGGESTING, 0);

        let (tour, requests) = {
            let _enter = span.enter();
            let backup = self.graph.clone();
            match self.run_pass(batches) {
                Ok(done) => done,
                Err(err) => {
                    tracing::warn!(error = %err, "pass failed, graph restored");
                    self.graph = backup;
                    return Err(err);
                }
            }
        };

        self.shortest_path = tour;
        self.report(events::STAGE_DONE, 100);
        let snapshot = self.snapshot();
        for listener in &self.listeners {
            listener.on_graph_updated(&snapshot);
        }

        for request in requests {
            if let Err(err) = self.requester.notify(request).await {
                tracing::debug!(error = %err, requester = self.requester.name(), "suggestion request dropped");
            }
        }

        Ok(&self.shortest_path)
    }

    fn run_pass(&mut self, batches: Vec<QualBatch>) -> Result<(Tour, Vec<SuggestionRequest>)> {
        for batch in batches {
            self.graph.append(batch)?;
        }
        linker::link_graph(&mut self.graph)?;
        let requests = valuation::value_links(&mut self.graph, &self.config.database);
        let tour = self.solver.solve(&self.graph, &self.cost)?;
        let distance = solver::compute_distance(&self.graph, &tour.node_ids(), &self.cost)?;
        tracing::debug!(
            nodes = self.graph.len(),
            links = self.graph.link_count(),
            deferred = requests.len(),
            solver = self.solver.name(),
            distance,
            "pass complete"
        );
        Ok((tour, requests))
    }

    fn report(&mut self, stage: &str, percent: u8) {
        let progress = Progress::new(stage, percent);
        self.stage = progress.stage.clone();
        self.progress = progress.percent;
        for listener in &self.listeners {
            listener.on_progress(&progress);
        }
    }

    pub fn config(&self) -> &WizardConfig {
        &self.config
    }

    pub fn datasource(&self) -> &DataSource {
        &self.datasource
    }

    pub fn graph(&self) -> &QualGraph {
        &self.graph
    }

    pub fn nodes(&self) -> &[Node] {
        self.graph.nodes()
    }

    pub fn links(&self) -> Vec<Link> {
        self.graph.links()
    }

    /// The last published tour.
    pub fn shortest_path(&self) -> &Tour {
        &self.shortest_path
    }

    /// Distance of the last published tour under the configured cost model.
    pub fn shortest_path_cost(&self) -> Result<i64> {
        solver::compute_distance(&self.graph, &self.shortest_path.node_ids(), &self.cost)
    }

    pub fn stage(&self) -> &str {
        &self.stage
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn snapshot(&self) -> GraphSnapshot {
        self.graph.snapshot(&self.shortest_path)
    }

    /// Access the suggestion requester (for advanced use).
    pub fn requester(&self) -> &R {
        &self.requester
    }
}

/// Wizard recording its suggestion requests in memory.
impl Wizard<MemoryRequester> {
    pub fn in_memory(config: WizardConfig, registry: &DataSourceRegistry) -> Result<Self> {
        Self::new(config, registry, MemoryRequester::new())
    }
}

/// Wizard posting its suggestion requests to `config.suggest_url`.
#[cfg(feature = "http")]
impl Wizard<HttpRequester> {
    pub fn http(config: WizardConfig, registry: &DataSourceRegistry) -> Result<Self> {
        let base_url = config
            .suggest_url
            .clone()
            .ok_or_else(|| Error::Config("suggest_url is required for the HTTP requester".into()))?;
        Self::new(config, registry, HttpRequester::new(base_url))
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("The content source could not be found: {0}")]
    ContentSourceNotFound(String),

    #[error("A single qual should not touch more than one table: node {node} has relations {expected} and {found}")]
    ConflictingRelation { node: NodeId, expected: Oid, found: Oid },

    #[error("Uncomputable path: no link from {from} to {to}")]
    UncomputablePath { from: NodeId, to: NodeId },

    #[error("No unvisited node reachable from {from}")]
    MissingLink { from: NodeId },

    #[error("Duplicate node: {0}")]
    DuplicateNode(NodeId),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Suggestion request error: {0}")]
    Suggest(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
