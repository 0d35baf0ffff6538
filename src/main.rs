#[tokio::main]
async fn main() {
    if let Err(error) = seo_publisher_lib::run().await {
        eprintln!("seo publisher failed: {error}");
        std::process::exit(1);
    }
}
