use bevy_viewport_socket::{DemoServer, ServerConfig};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let server = DemoServer::bind(ServerConfig::default()).await?;
    server.run().await;
    Ok(())
}
