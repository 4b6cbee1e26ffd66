#[tokio::main]
async fn main() {
    if let Err(e) = calendar_backend::run().await {
        eprintln!("calendar-backend failed: {}", e);
        std::process::exit(1);
    }
}
