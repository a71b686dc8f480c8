use dotenv::dotenv;
use pearfect::configuration::get_configuration;
use pearfect::startup::Application;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[actix_web::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pearfect=info,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let configuration = get_configuration()?;
    let application = Application::build(configuration).await?;
    info!("Pearfect listening on port {}", application.port());
    application.run_until_stopped().await?;

    Ok(())
}
