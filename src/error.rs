use std::{error::Error, fmt};

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use churn_model::ModelErr;

/// Request-path failures surfaced to the HTTP layer.
///
/// Malformed form bodies never reach a handler; actix's `Form` extractor
/// rejects them with 400 first. Anything that gets here is a server-side
/// inference problem.
#[derive(Debug)]
pub enum AppErr {
    Model(ModelErr),
}

impl fmt::Display for AppErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppErr::Model(e) => write!(f, "inference failed: {e}"),
        }
    }
}

impl Error for AppErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AppErr::Model(e) => Some(e),
        }
    }
}

impl From<ModelErr> for AppErr {
    fn from(value: ModelErr) -> Self {
        Self::Model(value)
    }
}

impl ResponseError for AppErr {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        log::error!("{self}");
        HttpResponse::build(self.status_code()).body(self.to_string())
    }
}
