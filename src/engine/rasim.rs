use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::Parser;
use clap::ValueEnum;
use tracing::debug;
use tracing::info;

use crate::config::load_config;
use crate::config::Config;
use crate::err_with_loc;
use crate::error::Result;
use crate::model::filter::FilterState;
use crate::model::filter::FlowMode;
use crate::model::graph::GraphView;
use crate::model::graph::NodeKind;
use crate::rpc::HttpLedgerClient;
use crate::session::GraphSession;
use crate::session::SessionState;
use crate::tracing::setup_tracing;
use crate::utils::mist_to_sui;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FlowArg {
    All,
    In,
    Out,
    Internal,
}

impl From<FlowArg> for FlowMode {
    fn from(arg: FlowArg) -> Self {
        match arg {
            FlowArg::All => FlowMode::All,
            FlowArg::In => FlowMode::In,
            FlowArg::Out => FlowMode::Out,
            FlowArg::Internal => FlowMode::Internal,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "rasim", about = "Map the fund flow around a ledger address")]
pub struct Cli {
    /// Root address under investigation (0x + 64 hex characters)
    pub address: Option<String>,

    #[arg(long, default_value = "Config.toml")]
    pub config: PathBuf,

    /// Case-insensitive node search over id, kind and display name
    #[arg(long)]
    pub search: Option<String>,

    /// Restrict nodes to these kinds (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub kind: Vec<NodeKind>,

    #[arg(long, value_enum, default_value = "all")]
    pub flow: FlowArg,

    /// Inclusive edge-value bounds, smallest unit
    #[arg(long)]
    pub min_amount: Option<u64>,
    #[arg(long)]
    pub max_amount: Option<u64>,

    /// Inclusive day-granular window, e.g. 2024-05-06
    #[arg(long)]
    pub from: Option<NaiveDate>,
    #[arg(long)]
    pub to: Option<NaiveDate>,
}

impl Cli {
    fn filter_state(&self) -> FilterState {
        FilterState {
            text_query: self.search.clone().unwrap_or_default(),
            allowed_node_kinds: self.kind.iter().copied().collect::<HashSet<_>>(),
            flow_mode: self.flow.into(),
            min_amount: self.min_amount,
            max_amount: self.max_amount,
            start_date: self.from,
            end_date: self.to,
        }
    }
}

pub struct Rasim;

impl Rasim {
    pub async fn run() -> Result<()> {
        let cli = Cli::parse();
        dotenvy::dotenv().ok();

        let mut config = if cli.config.exists() {
            load_config(&cli.config).await.map_err(|e| err_with_loc!(e))?
        } else {
            Config::default()
        };
        let _guard = setup_tracing("rasim", &config.logging);

        if let Ok(url) = std::env::var("SHABAKA_RPC_URL") {
            debug!("rpc_url_override_from_env");
            config.rpc.url = url;
        }

        let Some(address) = cli.address.as_deref() else {
            // Zero-result case one of three: nothing was asked yet
            eprintln!("No address entered. Pass a ledger address (0x followed by 64 hex characters).");
            return Ok(());
        };

        info!("starting_rasim::{}", address);
        let client = Arc::new(HttpLedgerClient::new(&config.rpc)?);
        let mut session = GraphSession::new(client, config.ingest.page_size);

        session.load(address).await;
        session.set_filter(cli.filter_state());

        match session.state() {
            SessionState::Error(err) => Err(err.clone().into()),
            SessionState::EmptyResult => {
                eprintln!("Address is valid but has no transactions.");
                Self::print_viewable(&session);
                Ok(())
            }
            SessionState::Ready(graph) => {
                let total: u64 = session.records().iter().map(|record| record.amount).sum();
                info!(
                    "graph_built::nodes::{}::edges::{}::total_value_sui::{:.3}",
                    graph.node_count(),
                    graph.edge_count(),
                    mist_to_sui(total)
                );

                let filtered_out = session
                    .viewable()
                    .map(|view| graph.edge_count() > 0 && view.edge_count() == 0)
                    .unwrap_or(false);
                if filtered_out {
                    eprintln!("Transactions exist but none match the current filters.");
                }
                Self::print_viewable(&session);
                Ok(())
            }
            // load() always leaves Ready, Error or EmptyResult
            state => {
                debug!("unexpected_terminal_state::{}", state.name());
                Ok(())
            }
        }
    }

    fn print_viewable(session: &GraphSession<HttpLedgerClient>) {
        if let Some(view) = session.viewable() {
            let view = GraphView::from(view);
            match serde_json::to_string_pretty(&view) {
                Ok(rendered) => println!("{rendered}"),
                Err(err) => eprintln!("failed to serialize graph: {err}"),
            }
        }
    }
}
