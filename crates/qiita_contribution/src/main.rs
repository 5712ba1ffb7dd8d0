use clap::Parser;
use qiita_client::http_client::ReqwestQiitaClient;
use qiita_contribution::cli::CliArgs;

fn init_logging() {
    // `QIITA_LOG_LEVEL` wins over `RUST_LOG`; default `info`.
    let log_env = std::env::var("QIITA_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_new(&log_env)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter)
        .init();
    tracing::debug!(%log_env, "qiita_contribution: log filter");
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_logging();

    let (config, request) = args.into_parts()?;
    let client = ReqwestQiitaClient::from_config(&config)?;
    qiita_contribution::run(&client, &request).await?;
    Ok(())
}
