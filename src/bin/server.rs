use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use safar::agents::{ContentCreatorAgent, TripPlannerAgent};
use safar::ai::OpenAiCompletions;
use safar::api::{AppState, build_app};
use safar::core::config::AppConfig;
use safar::core::message::Intent;
use safar::publish::StubScheduler;
use safar::router::AgentRouter;
use safar::store::SqlitePackageStore;
use safar::video::{FfmpegComposer, YtDlpSource};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    safar::setup_logging();

    let config = AppConfig::from_env().map_err(anyhow::Error::msg)?;

    let store = Arc::new(
        SqlitePackageStore::connect(&config.db_path)
            .await
            .context("opening package store")?,
    );
    let completions = Arc::new(OpenAiCompletions::new(
        config.openai_api_key.clone(),
        config.openai_org_id.clone(),
        config.openai_model.clone(),
    ));
    let video_source = Arc::new(YtDlpSource::new(
        config.ytdlp_bin.clone(),
        config.download_dir.clone().into(),
    ));
    let composer = Arc::new(FfmpegComposer::new(
        config.ffmpeg_bin.clone(),
        config.output_dir.clone().into(),
    ));
    let scheduler = Arc::new(StubScheduler);

    let mut router = AgentRouter::new();
    router.register(
        Intent::ContentCreator,
        Arc::new(ContentCreatorAgent::new(
            video_source,
            completions.clone(),
            composer,
            scheduler,
            config.max_clip_seconds,
        )),
    );
    router.register(
        Intent::TripPlanner,
        Arc::new(TripPlannerAgent::new(
            store,
            completions,
            config.public_base_url.clone(),
        )),
    );

    let app = build_app(AppState {
        router: Arc::new(router),
    });

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "Server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
