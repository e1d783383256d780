use dotenvy::dotenv;
use gradebook::logging::init_tracing;
use gradebook::router::init_router;
use gradebook::state::init_app_state;
use gradebook_config::ServerConfig;

#[tokio::main]
async fn main() {
    dotenv().ok();

    init_tracing();

    let state = init_app_state().await;
    let app = init_router(state);

    let server_config = ServerConfig::from_env();
    let listener = tokio::net::TcpListener::bind(server_config.bind_addr())
        .await
        .expect("Failed to bind server address");
    println!("🚀 Server running on http://{}", server_config.bind_addr());
    println!(
        "📚 Swagger UI available at http://{}/swagger-ui",
        server_config.bind_addr()
    );
    println!(
        "📖 Scalar UI available at http://{}/scalar",
        server_config.bind_addr()
    );
    axum::serve(listener, app).await.expect("Server error");
}
