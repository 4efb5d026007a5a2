use std::{io, sync::Arc};

use actix_web::{web, App, HttpServer};
use churn_model::ChurnModel;
use churn_server::{config::ServerConfig, handlers};

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init();

    let config = ServerConfig::from_env();
    let model = ChurnModel::load(config.scaler_path(), config.forest_path())
        .map_err(io::Error::from)?;
    log::info!(
        "loaded artifacts: scaler={} forest={} ({} trees, {} features)",
        config.scaler_path().display(),
        config.forest_path().display(),
        model.forest().n_trees(),
        model.forest().n_features(),
    );

    let model = web::Data::new(Arc::new(model));
    log::info!("listening on {}", config.bind_addr());
    HttpServer::new(move || {
        App::new()
            .app_data(model.clone())
            .configure(handlers::configure)
    })
    .bind(config.bind_addr())?
    .run()
    .await
}
