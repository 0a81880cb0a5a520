use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

use seasonality_web::artifact::ArtifactBundle;
use seasonality_web::config::Config;
use seasonality_web::layout::render_page;
use seasonality_web::logging::{log, obj, v_str, Domain, Level};
use seasonality_web::server::{router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();
    if cfg.debug && std::env::var("LOG_LEVEL").is_err() {
        std::env::set_var("LOG_LEVEL", "debug");
    }

    log(
        Level::Info,
        Domain::System,
        "startup",
        obj(&[
            ("bind", v_str(&cfg.bind_addr())),
            ("artifact_path", v_str(&cfg.artifact_path)),
            ("debug", serde_json::json!(cfg.debug)),
        ]),
    );

    // Fatal on any load or shape failure: there is no degraded-serving mode
    // without the bundle.
    let bundle = ArtifactBundle::load(Path::new(&cfg.artifact_path)).map_err(|err| {
        log(
            Level::Fatal,
            Domain::Artifact,
            "bundle_load_failed",
            obj(&[("error", v_str(&format!("{:#}", err)))]),
        );
        err
    })?;

    let state = Arc::new(AppState {
        page: render_page(&cfg),
        bundle,
    });
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr())
        .await
        .with_context(|| format!("cannot bind {}", cfg.bind_addr()))?;
    log(
        Level::Info,
        Domain::System,
        "listening",
        obj(&[("url", v_str(&format!("http://{}", cfg.bind_addr())))]),
    );
    axum::serve(listener, app).await.context("server terminated")?;
    Ok(())
}
