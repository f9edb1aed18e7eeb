use crate::errors::ServerError;
use astra::{Body, Response, ResponseBuilder};

pub type ResultResp = Result<Response, ServerError>;

/// Convert a ServerError into a proper HTML response
pub fn error_to_response(err: ServerError) -> Response {
    match err {
        ServerError::NotFound => html_error_response(404, "Página não encontrada"),
        ServerError::BadRequest(msg) => html_error_response(400, &msg),
        ServerError::DbError(msg) => {
            log::error!("Database error: {msg}");
            html_error_response(500, "Erro interno")
        }
        ServerError::Catalog(e) => {
            log::error!("Catalog error: {e}");
            html_error_response(500, "Erro interno")
        }
        ServerError::InternalError => html_error_response(500, "Erro interno"),
    }
}

/// Build an HTML error page
pub fn html_error_response(status: u16, message: &str) -> Response {
    let html = maud::html! {
        (maud::DOCTYPE)
        html lang="pt-BR" {
            head { meta charset="utf-8"; title { "Erro " (status) } }
            body {
                h1 { "Erro " (status) }
                p { (message) }
            }
        }
    };

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "text/html; charset=utf-8")
        .body(Body::from(html.into_string()))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
