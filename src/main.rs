#[tokio::main]
async fn main() -> std::io::Result<()> {
    events_api::run().await
}
