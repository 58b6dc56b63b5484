use anyhow::Context;
use clap::Parser;
use nomu_relay::relay_state::{RelayConfig, RelayState};
use nomu_relay::server::startup;
use tokio::signal;

/// HTTP relay between the Nomu app and an OpenAI-compatible
/// chat completion provider.
#[derive(Debug, Parser)]
#[command(name = "nomu-relay", version)]
struct Cli {
    /// Address to bind the HTTP server on
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to bind the HTTP server on
    #[arg(long, default_value_t = 8080)]
    port: u16,

    /// Model identifier sent with every completion request
    #[arg(long, default_value = "gpt-3.5-turbo")]
    model: String,

    /// Base URL of the completion provider
    #[arg(long, default_value = "https://api.openai.com")]
    api_base: String,

    /// Provider request timeout in seconds
    #[arg(long, default_value_t = 600)]
    timeout: u64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let api_key =
        std::env::var("OPENAI_API_KEY").context("OPENAI_API_KEY must be set in the environment")?;

    let relay_config = RelayConfig {
        host: cli.host,
        port: cli.port,
        model: cli.model,
        api_base: cli.api_base,
        timeout: cli.timeout,
        api_key,
    };
    let relay_state = RelayState::new(relay_config.clone())
        .context("Failed to build relay state")?;

    actix_web::rt::System::new().block_on(async move {
        tokio::select! {
            res = startup(relay_config, relay_state) => {
                res.context("server terminated")?;
            }
            _ = signal::ctrl_c() => {
                println!("Received Ctrl+C, shutting down");
            }
        }
        Ok(())
    })
}
