#[tokio::main]
async fn main() {
    if let Err(err) = customer_service::run().await {
        eprintln!("customer-service: {}", err);
        std::process::exit(1);
    }
}
