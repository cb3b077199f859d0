//! Falante - piper 语音合成 HTTP 服务

use std::sync::Arc;

use falante::config::{load_config, print_config, LogConfig};
use falante::domain::voice::VoiceRegistry;
use falante::infrastructure::http::{AppState, HttpServer, ServerConfig};
use falante::infrastructure::{
    DelayedCleanupScheduler, FileArtifactStore, PiperCliConfig, PiperCliEngine,
};

fn init_tracing(log: &LogConfig) {
    let log_filter = format!("{},falante={},tower_http=debug", log.level, log.level);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let loaded = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
    let config = loaded.config;

    // 初始化日志
    init_tracing(&config.log);

    tracing::info!("Falante - piper TTS HTTP service");
    for warning in &loaded.warnings {
        tracing::warn!("{}", warning);
    }
    print_config(&config);

    // 输出目录在创建存储时确保存在
    let artifact_store = Arc::new(
        FileArtifactStore::new(&config.storage.output_dir)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to prepare output directory: {}", e))?,
    );

    let tts_engine = Arc::new(PiperCliEngine::new(PiperCliConfig {
        bin: config.synthesis.piper_bin.clone(),
        data_dir: config.synthesis.data_dir.clone(),
        extra_args: config.synthesis.extra_args.clone(),
        timeout: config.synthesis.timeout(),
        max_concurrent: config.synthesis.max_concurrent,
    }));

    let cleanup_scheduler = Arc::new(DelayedCleanupScheduler::new(
        config.storage.delete_after(),
        artifact_store.clone(),
    ));

    let state = AppState::new(
        config.auth.api_key.clone(),
        tts_engine,
        artifact_store,
        cleanup_scheduler,
        Arc::new(VoiceRegistry::builtin()),
        config.synthesis.max_chars,
    );

    let server_config = ServerConfig::new(&config.server.host, config.server.port)
        .with_max_chars(config.synthesis.max_chars);
    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
