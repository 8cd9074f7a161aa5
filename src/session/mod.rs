use std::sync::Arc;

use tracing::debug;
use tracing::warn;

use crate::error::IngestError;
use crate::model::address::Address;
use crate::model::filter::FilterState;
use crate::model::graph::FlowGraph;
use crate::model::transaction::TransactionRecord;
use crate::pipeline::FilterPipeline;
use crate::pipeline::GraphBuilder;
use crate::pipeline::Ingestor;
use crate::rpc::LedgerQueryClient;

/// Lifecycle of one investigation. `Loading` is re-entered only on a new
/// address request; zero transactions is a terminal state of its own, not
/// an error.
#[derive(Debug)]
pub enum SessionState {
    Idle,
    Loading,
    Ready(FlowGraph),
    Error(IngestError),
    EmptyResult,
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Loading => "loading",
            SessionState::Ready(_) => "ready",
            SessionState::Error(_) => "error",
            SessionState::EmptyResult => "empty_result",
        }
    }
}

/// Owns the current root address, the ingested records and the active
/// filter. Records and graph are rebuilt wholesale on address change;
/// filter changes only re-run the filter pipeline.
///
/// Supersession: every request stamps a monotonically increasing token and
/// completion is applied only for the latest token. Tokens, not address
/// strings, decide staleness, so requesting the same address twice in
/// succession cannot race. [`GraphSession::load`] drives the pair
/// sequentially; event-driven callers can interleave `begin_request` /
/// `finish_request` themselves.
pub struct GraphSession<C> {
    ingestor: Ingestor<C>,
    state: SessionState,
    root: Option<Address>,
    records: Vec<TransactionRecord>,
    filter: FilterState,
    viewable: Option<FlowGraph>,
    latest_request: u64,
}

impl<C: LedgerQueryClient> GraphSession<C> {
    pub fn new(client: Arc<C>, page_size: usize) -> Self {
        Self {
            ingestor: Ingestor::new(client, page_size),
            state: SessionState::Idle,
            root: None,
            records: Vec::new(),
            filter: FilterState::default(),
            viewable: None,
            latest_request: 0,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn root(&self) -> Option<Address> {
        self.root
    }

    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// The reconciled subgraph the renderer should draw, when one exists.
    pub fn viewable(&self) -> Option<&FlowGraph> {
        self.viewable.as_ref()
    }

    /// Starts a request and returns its token. Returns `None` when the
    /// address is already loaded without error: a duplicate fetch is
    /// suppressed.
    pub fn begin_request(&mut self, address: Address) -> Option<u64> {
        if let SessionState::Ready(_) = self.state {
            if self.root == Some(address) {
                debug!("session::duplicate_request_suppressed::{}", address);
                return None;
            }
        }

        self.latest_request += 1;
        self.root = Some(address);
        self.records.clear();
        self.viewable = None;
        self.state = SessionState::Loading;
        debug!("session::request_started::{}::token::{}", address, self.latest_request);
        Some(self.latest_request)
    }

    /// Applies an ingest outcome. A stale token (superseded by a newer
    /// request) is ignored and `false` returned; the in-flight I/O itself
    /// is never cancelled, only its result discarded.
    pub fn finish_request(
        &mut self,
        token: u64,
        outcome: Result<Vec<TransactionRecord>, IngestError>,
    ) -> bool {
        if token != self.latest_request {
            debug!(
                "session::stale_response_ignored::token::{}::latest::{}",
                token, self.latest_request
            );
            return false;
        }

        match outcome {
            Err(err) => {
                warn!("session::ingest_failed::{}", err);
                self.records.clear();
                self.state = SessionState::Error(err);
            }
            Ok(records) => {
                let Some(root) = self.root else {
                    return false;
                };
                if records.is_empty() {
                    self.records.clear();
                    self.state = SessionState::EmptyResult;
                } else {
                    let graph = GraphBuilder::build(&records, root);
                    self.records = records;
                    self.state = SessionState::Ready(graph);
                }
            }
        }

        self.refresh_viewable();
        debug!("session::request_finished::token::{}::state::{}", token, self.state.name());
        true
    }

    /// Validate, fetch, build, filter. Address parse failures never reach
    /// the network.
    pub async fn load(&mut self, address: &str) -> &SessionState {
        let parsed = match address.parse::<Address>() {
            Ok(parsed) => parsed,
            Err(err) => {
                self.latest_request += 1;
                self.root = None;
                self.records.clear();
                self.viewable = None;
                self.state = SessionState::Error(IngestError::InvalidAddress(err.to_string()));
                return &self.state;
            }
        };

        let Some(token) = self.begin_request(parsed) else {
            return &self.state;
        };
        let outcome = self.ingestor.fetch(parsed).await;
        self.finish_request(token, outcome);
        &self.state
    }

    /// Replaces the filter and re-evaluates only the filter pipeline;
    /// never re-ingests.
    pub fn set_filter(&mut self, filter: FilterState) {
        self.filter = filter;
        self.refresh_viewable();
    }

    /// Edge-activation contract for the renderer: every record whose
    /// sender/recipient pair matches the endpoints, either direction.
    pub fn records_for_edge(&self, a: Address, b: Address) -> Vec<TransactionRecord> {
        self.records
            .iter()
            .filter(|record| record.involves_pair(&a, &b))
            .cloned()
            .collect()
    }

    fn refresh_viewable(&mut self) {
        self.viewable = match &self.state {
            SessionState::Ready(graph) => {
                Some(FilterPipeline::apply(graph, &self.records, &self.filter))
            }
            // Zero transactions still render the root node
            SessionState::EmptyResult => self.root.map(|root| GraphBuilder::build(&[], root)),
            _ => None,
        };
    }
}
