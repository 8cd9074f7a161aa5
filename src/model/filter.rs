use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

use crate::model::graph::Flow;
use crate::model::graph::NodeKind;

/// Edge-level flow restriction. `All` admits every classification,
/// including edges between two non-root addresses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowMode {
    #[default]
    All,
    In,
    Out,
    Internal,
}

impl FlowMode {
    pub fn admits(&self, flow: Flow) -> bool {
        match self {
            FlowMode::All => true,
            FlowMode::In => flow == Flow::In,
            FlowMode::Out => flow == Flow::Out,
            FlowMode::Internal => flow == Flow::Internal,
        }
    }
}

/// Caller-owned filter dimensions. The default on every dimension means
/// "no restriction"; an empty `allowed_node_kinds` set does NOT exclude
/// all kinds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub text_query: String,
    #[serde(default)]
    pub allowed_node_kinds: HashSet<NodeKind>,
    #[serde(default)]
    pub flow_mode: FlowMode,
    #[serde(default)]
    pub min_amount: Option<u64>,
    #[serde(default)]
    pub max_amount: Option<u64>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl FilterState {
    /// True when no dimension restricts anything. Applying such a state
    /// returns the input graph unchanged.
    pub fn is_unrestricted(&self) -> bool {
        self.text_query.is_empty()
            && self.allowed_node_kinds.is_empty()
            && self.flow_mode == FlowMode::All
            && self.min_amount.is_none()
            && self.max_amount.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }

    pub fn has_date_bound(&self) -> bool {
        self.start_date.is_some() || self.end_date.is_some()
    }
}
