use std::io;
use std::sync::Arc;

use ntex::web;
use spdlog::{error, info};

use crate::config::Config;
use crate::content_store::ContentStore;
use crate::error::FeedError;
use crate::feed::FeedBuilder;
use crate::social::SocialLink;

struct AppState {
    store: Arc<ContentStore>,
    feed: FeedBuilder,
    socials: Vec<SocialLink>,
}

fn feed_error(name: &str, e: FeedError) -> web::HttpResponse {
    error!("Error rendering {}: {}", name, e);
    let mut response = if e.is_config_error() {
        web::HttpResponse::ServiceUnavailable()
    } else {
        web::HttpResponse::InternalServerError()
    };
    response
        .content_type("text/plain; charset=utf-8")
        .body(format!("Error rendering {}", name))
}

#[web::get("/rss.xml")]
async fn rss(state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    match state.feed.rss(state.store.clone()).await {
        Ok(xml) => web::HttpResponse::Ok()
            .content_type("application/xml; charset=utf-8")
            .body(xml),
        Err(e) => feed_error("rss feed", e),
    }
}

#[web::get("/feed.json")]
async fn feed_json(state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    match state.feed.json(state.store.as_ref()) {
        Ok(json) => web::HttpResponse::Ok()
            .content_type("application/json")
            .body(json),
        Err(e) => feed_error("json feed", e),
    }
}

#[web::get("/socials.json")]
async fn socials(state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    match serde_json::to_vec(&state.socials) {
        Ok(json) => web::HttpResponse::Ok()
            .content_type("application/json")
            .body(json),
        Err(e) => feed_error("social links", FeedError::Json(e)),
    }
}

pub async fn server_run(config: Config, store: ContentStore) -> io::Result<()> {
    let bind_addr = config.server.address.clone();
    let bind_port = config.server.port;

    if let Err(e) = FeedBuilder::new(config.feed_settings()).site_url() {
        error!("The rss feed will not be available: {}", e);
    }

    let app_state = Arc::new(AppState {
        store: Arc::new(store),
        feed: FeedBuilder::new(config.feed_settings()),
        socials: config.socials,
    });

    info!("Listening on {}:{}", bind_addr, bind_port);

    web::HttpServer::new(move || {
        web::App::new()
            .state(app_state.clone())
            .service(rss)
            .service(feed_json)
            .service(socials)
    })
        .bind((bind_addr, bind_port))?
        .run()
        .await
}
