#[tokio::main]
async fn main() -> anyhow::Result<()> {
    epidemic_dashboard_lib::run().await
}
