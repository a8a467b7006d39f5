//! End-to-end mood search against the real directory and inference service.
//!
//! Usage:
//!   TERRADIO_INFERENCE_KEY=... cargo run --example mood_search -- "rainy jazz cafe in tokyo"

use terradio_core::source::{HttpInferenceSource, RadioBrowserSource};
use terradio_core::{initial_catalog, GlobeFrame, LoadPlan, MarkerOverlay, MoodPlanner};
use terradio_proto::config::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let free_text = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "rainy jazz cafe in tokyo".to_string());

    let config = Config::load()?;
    let client = reqwest::Client::builder()
        .user_agent("terradio/0.1")
        .build()?;

    let directory = RadioBrowserSource::from_config(client.clone(), &config.directory);
    let inference = HttpInferenceSource::from_config(client, &config.inference)?;

    let catalog = initial_catalog(&directory, &LoadPlan::from_config(&config.load)).await;
    info!(stations = catalog.len(), "initial catalog loaded");

    let overlay = MarkerOverlay::from_records(catalog.iter(), config.globe.sphere_radius);
    let mut frame = GlobeFrame::new(&config.globe);
    frame.advance(1.0 / 60.0);
    info!(
        markers = overlay.len(),
        angle = frame.sphere_transform().angle,
        "globe overlay ready"
    );

    let planner = MoodPlanner::new(directory, inference);
    let resolution = planner.resolve_mood(&free_text).await;

    println!("{}", resolution.explanation);
    for record in resolution.catalog.iter().take(10) {
        let (lat, lon) = record.coordinates().unwrap_or((0.0, 0.0));
        println!(
            "  {:40} {:12} ({:+07.2}, {:+08.2})  {}",
            record.name, record.country, lat, lon, record.playable_url()
        );
    }
    if resolution.catalog.is_empty() {
        println!("  (no matching stations)");
    }

    Ok(())
}
