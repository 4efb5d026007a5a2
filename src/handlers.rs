use std::sync::Arc;

use actix_web::{get, http::header::ContentType, post, web, HttpResponse, Responder};
use churn_model::ChurnModel;

use crate::{error::AppErr, features::ChurnForm, pages};

#[get("/")]
async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(pages::INDEX_HTML)
}

#[get("/dashboard")]
async fn dashboard() -> impl Responder {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(pages::DASHBOARD_HTML)
}

/// Runs one prediction: encode the form, scale, infer, render.
#[post("/predict")]
async fn predict(
    model: web::Data<Arc<ChurnModel>>,
    form: web::Form<ChurnForm>,
) -> Result<HttpResponse, AppErr> {
    let form = form.into_inner();
    let features = form.encode(model.scaler())?;
    let class = model.predict(features.view())?;
    log::debug!(
        "prediction: class={class} contract={} tenure={}",
        form.contract,
        form.tenure
    );
    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(pages::render_result(class)))
}

/// Registers all routes on an actix `App`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index).service(dashboard).service(predict);
}
