use crate::errors::ServerError;
use astra::{Body, Response, ResponseBuilder};
use maud::{html, DOCTYPE};
use tracing::warn;

pub type ResultResp = Result<Response, ServerError>;

/// Convert a ServerError into a proper HTML response
pub fn error_to_response(err: ServerError) -> Response {
    match err {
        ServerError::NotFound => html_error_response(404, "Page introuvable"),
        ServerError::BadRequest(msg) => html_error_response(400, &msg),
        ServerError::Upstream(msg) => {
            warn!(error = %msg, "upstream error");
            html_error_response(502, "Le service est momentanément indisponible")
        }
        ServerError::InternalError => html_error_response(500, "Erreur interne"),
    }
}

/// Build an HTML error page
pub fn html_error_response(status: u16, message: &str) -> Response {
    let page = html! {
        (DOCTYPE)
        html lang="fr" {
            head {
                meta charset="utf-8";
                title { "Erreur " (status) }
            }
            body {
                h1 { "Erreur " (status) }
                p { (message) }
                p { a href="/" { "← Retour à l'accueil" } }
            }
        }
    };

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::TEXT_HTML_UTF_8.as_ref())
        .body(Body::from(page.into_string()))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
