mod config;
mod error;
mod server;
mod state;

use std::sync::Arc;

use rmcp::{ServiceExt, transport::stdio};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use quiz_common::model::QuizDefinition;
use quiz_common::reporter::{ScoreSink, ScoringClient};
use server::QuizSummaryServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout is reserved for MCP JSON-RPC
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting quiz-summary MCP server");

    let config = Config::from_env()?;
    info!(
        questions_path = %config.questions_path.display(),
        scoring = config.scoring.is_some(),
        "configuration loaded"
    );

    let content = std::fs::read_to_string(&config.questions_path).map_err(error::AppError::from)?;
    let quiz = Arc::new(QuizDefinition::parse(&content).map_err(error::AppError::from)?);
    info!(questions = quiz.len(), "quiz definition loaded");

    let sink: Option<Arc<dyn ScoreSink>> = match config.scoring.clone() {
        Some(scoring) => {
            info!(
                url = %scoring.url,
                timeout_ms = scoring.timeout.as_millis(),
                "score reporting enabled"
            );
            let client: Arc<dyn ScoreSink> = Arc::new(ScoringClient::new(scoring)?);
            Some(client)
        }
        None => {
            info!("SCORING_URL not set, running without score reporting");
            None
        }
    };

    if let Some(addr) = &config.tcp_listen_addr {
        let listener = TcpListener::bind(addr).await?;
        info!(listen_addr = %addr, "MCP server ready, serving on TCP");
        loop {
            let (stream, peer) = listener.accept().await?;
            let server = QuizSummaryServer::new(Arc::clone(&quiz), sink.clone());
            tokio::spawn(async move {
                info!(peer = %peer, "MCP client connected");
                let service = server.serve(stream).await.inspect_err(|e| {
                    tracing::error!(error = %e, "MCP server error");
                })?;
                service.waiting().await?;
                info!(peer = %peer, "MCP client disconnected");
                Ok::<(), anyhow::Error>(())
            });
        }
    } else {
        let server = QuizSummaryServer::new(quiz, sink);
        info!("MCP server ready, serving on stdio");
        let service = server.serve(stdio()).await.inspect_err(|e| {
            tracing::error!(error = %e, "MCP server error");
        })?;
        service.waiting().await?;
        info!("MCP server shut down");
    }
    Ok(())
}
