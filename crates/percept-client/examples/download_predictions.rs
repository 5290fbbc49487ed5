//! Download all image predictions of a project to `output/predictions`.
//!
//! Expects `PERCEPT_HOST` and `PERCEPT_TOKEN` in the environment (or a
//! `.env` file), plus `project.json` and `images.json` exported from the
//! project and media services.

use std::sync::Arc;

use percept_client::PredictionClient;
use percept_models::{Image, Project};
use percept_rest::RestSession;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut session = RestSession::from_env()?;
    session.refresh_version().await?;

    let project: Project = serde_json::from_str(&std::fs::read_to_string("project.json")?)?;
    let images: Vec<Image> = serde_json::from_str(&std::fs::read_to_string("images.json")?)?;

    let client = PredictionClient::new(Arc::new(session), "default", project);
    if !client.ready_to_predict().await? {
        eprintln!("project has no trained models yet");
        return Ok(());
    }

    let summary = client
        .download_predictions_for_images(&images, "output", true)
        .await?;
    println!(
        "downloaded {} predictions ({} skipped) in {:.1}s",
        summary.downloaded,
        summary.skipped,
        summary.elapsed_seconds()
    );
    Ok(())
}
