// ─────────────────────────────────────────────────────────────────────────────
//  Rasim — Address Flow Mapper
//  Part of the Shabaka Project.
//
//  Rasim (راسم): "The Mapper" — traces the flow of funds and interactions
//  around a ledger address and renders it as a filterable graph.
//
//  In the name of Allah, the Most Gracious, the Most Merciful.
// ─────────────────────────────────────────────────────────────────────────────

use shabaka::engine::rasim::Rasim;
use shabaka::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    Rasim::run().await?;
    Ok(())
}
