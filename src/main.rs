use museum_server::frameworks::server;

#[tokio::main]
async fn main() {
    if let Err(e) = server::run_with_config().await {
        eprintln!("museum server failed to start: {e}");
        std::process::exit(1);
    }
}
