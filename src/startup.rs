use crate::client::{ManifestClient, RemoteDataClient};
use crate::configuration::Settings;
use crate::dashboard::DashboardStore;
use crate::routes::{create_harvest, delete_harvest, home, login, logout};
use actix_web::dev::Server;
use actix_web::web::Data;
use actix_web::{App, HttpServer, web};
use std::net::TcpListener;
use std::sync::Arc;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        // One client for the application's lifetime, injected into
        // every handler. No module-level singleton.
        let client: Arc<dyn RemoteDataClient> =
            Arc::new(ManifestClient::from_settings(&configuration.backend));

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();
        let server = run(listener, client, configuration).await?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

async fn run(
    listener: TcpListener,
    client: Arc<dyn RemoteDataClient>,
    configuration: Settings,
) -> Result<Server, anyhow::Error> {
    let client = Data::from(client);
    let store = Data::new(DashboardStore::new());
    let settings = Data::new(configuration);
    let server = HttpServer::new(move || {
        App::new()
            .route("/", web::get().to(home))
            .route("/login", web::post().to(login))
            .route("/logout", web::post().to(logout))
            .route("/harvests", web::post().to(create_harvest))
            .route("/harvests/{harvest_id}/delete", web::post().to(delete_harvest))
            .app_data(client.clone())
            .app_data(store.clone())
            .app_data(settings.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}
