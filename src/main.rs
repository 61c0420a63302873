use anyhow::{Context, Result};
use clap::Parser;
use interview_coach::{
    create_router, AppState, ArtifactStore, AssemblyAiTranscriber, Config, OpenRouterClient,
    Pipeline,
};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "interview-coach", about = "Interview answer transcription and coaching service")]
struct Args {
    /// Configuration file (without extension)
    #[arg(long, default_value = "config/interview-coach")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    info!("{} v0.1.0", cfg.service.name);

    let store = Arc::new(ArtifactStore::new(&cfg.storage)?);
    let transcriber = Arc::new(AssemblyAiTranscriber::new(&cfg.transcription));
    let completion = Arc::new(OpenRouterClient::new(&cfg.completion));

    let pipeline = Arc::new(Pipeline::new(
        Arc::clone(&store),
        transcriber,
        completion,
    ));

    let state = AppState::new(pipeline, store);
    let app = create_router(state);

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    info!("HTTP server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    axum::serve(listener, app).await?;

    Ok(())
}
