use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};

use todo_server::api;
use todo_server::config::Config;
use todo_server::repository::database::Database;
use todo_server::repository::TodoStore;
use todo_server::telemetry;

const ENV_FILE: &str = "todo.env";

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_subscriber(env!("CARGO_PKG_NAME"));

    let config = match Config::load(ENV_FILE) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, file = ENV_FILE, "failed to load configuration");
            std::process::exit(1);
        }
    };

    let todo_db: Arc<dyn TodoStore> = Arc::new(Database::new(&config.database, config.decode_policy));
    let app_data = web::Data::from(todo_db);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_data.clone())
            .configure(api::config)
            .default_service(web::route().to(api::not_found))
            .wrap(Logger::default())
    })
    .bind((config.server.host.as_str(), config.server.port));

    let server = match server {
        Ok(server) => server,
        Err(err) => {
            tracing::error!(error = %err, host = %config.server.host, port = config.server.port, "failed to bind listener");
            return Err(err);
        }
    };

    tracing::info!(port = config.server.port, "listening on port {}", config.server.port);
    if let Err(err) = server.run().await {
        tracing::error!(error = %err, "server stopped");
        return Err(err);
    }
    Ok(())
}
