use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware::Logger, web, App, HttpServer};

use emp_monitor::monitor::config::Config;
use emp_monitor::monitor::mongo_db_handler::MongoDBHandler;
use emp_monitor::monitor::notifier::RoomRegistry;
use emp_monitor::monitor::seed;
use emp_monitor::monitor::web_api::handlers;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let db = MongoDBHandler::new(&config.mongo_uri, &config.db_name)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    log::info!("Connected to MongoDB database {}", config.db_name);

    // Seeding failures are logged, not fatal: the store may come up later.
    if let Err(e) = seed::create_default_users(&db).await {
        log::error!("Error creating default users: {}", e);
    }

    let db = web::Data::new(db);
    let rooms = web::Data::new(RoomRegistry::new());

    log::info!("Server running on port {}", config.port);
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin_fn(|_origin, _req_head| true)
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![header::AUTHORIZATION, header::ACCEPT, header::CONTENT_TYPE])
            .max_age(3600);
        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(db.clone())
            .app_data(rooms.clone())
            .configure(handlers::routes)
    })
    .bind(("0.0.0.0", config.port))?
    .run()
    .await
}
