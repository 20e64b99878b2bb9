use anyhow::Context;
use resend_demo::{app::App, config::get_configuration, telemetry::get_subscriber};
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = get_configuration().context("Failed to read configuration.")?;

    get_subscriber(&config.log_level, std::io::stderr).init();

    let environment = config.application.environment;
    let app = App::with(config).await?;
    let host = app.host()?;
    let port = app.port()?;

    tracing::info!(
        %host,
        port,
        environment = environment.as_str(),
        "starting server"
    );
    app.serve().await.context("The server should be running")?;

    Ok(())
}
