// End-to-end demo: seed a mock store, run one load + push cycle through a
// view session, and print the ranked graph it publishes.

use anyhow::Result;
use engine_core::common::{SpaceId, ViewerContext, WalletId};
use engine_core::config::Config;
use engine_core::kernel::{MockPostingStore, StreamHub, ViewSession};
use engine_core::kernel::traits::FetchResponse;
use serde_json::json;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Config::from_env()?;
    let hub = StreamHub::with_capacity(config.hub_capacity);

    let now_ms = chrono::Utc::now().timestamp_millis();
    let posting = |key: &str, skill: &str, wallet: &str, age_min: i64| {
        json!({
            "key": key,
            "wallet": wallet,
            "skill": skill,
            "spaceId": "mentorship",
            "createdAt": now_ms - age_min * 60_000,
            "ttlSeconds": 7200,
            "message": format!("looking around {}", skill),
            "status": "open"
        })
    };

    let store = MockPostingStore::new().on_fetch(
        None,
        FetchResponse {
            asks: vec![
                posting("ask-1", "Solidity", "0xalice", 5),
                posting("ask-2", "design", "0xbob", 200),
            ],
            offers: vec![posting("offer-1", "solidity", "0xcarol", 10)],
            ..Default::default()
        },
    );

    let viewer = ViewerContext::new(WalletId::new("0xviewer"), ["solidity", "rust"]);
    let mut session = ViewSession::new(viewer, SpaceId::new("mentorship"), config, hub.clone());
    let mut rx = hub.subscribe(&session.topic()).await;

    session.load(&store, None).await?;
    println!("--- after initial fetch ---");
    println!("{}", serde_json::to_string_pretty(&rx.recv().await?)?);

    // a creation event arrives over the live stream
    session
        .apply_push(&json!({
            "kind": "offer",
            "posting": posting("offer-2", "Solidity Auditing", "0xdave", 0)
        }))
        .await;
    println!("--- after pushed offer ---");
    println!("{}", serde_json::to_string_pretty(&rx.recv().await?)?);

    Ok(())
}
