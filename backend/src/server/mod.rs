//! Server construction and route wiring.

mod config;

pub use config::ServerConfig;

use std::net::SocketAddr;

use actix_web::dev::Server;
use actix_web::{App, HttpServer};

use trivia_backend::inbound::http::{self, HttpState};
#[cfg(debug_assertions)]
use trivia_backend::ApiDoc;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Bind the HTTP server with the full endpoint surface.
///
/// Swagger UI is mounted under `/docs` in debug builds only.
pub fn create_server(state: HttpState, bind_addr: SocketAddr) -> std::io::Result<Server> {
    let server = HttpServer::new(move || {
        let app = App::new().configure(http::configure(state.clone()));
        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
        app
    })
    .bind(bind_addr)?;
    Ok(server.run())
}
