use mailhog_client::{Client, Error, SearchKind};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mailhog_client=debug")),
        )
        .init();

    let base_url = std::env::var("MAILHOG_URL")
        .unwrap_or_else(|_| mailhog_client::constants::DEFAULT_BASE_URL.to_string());

    let client = Client::builder()
        .base_url(base_url)
        .timeout(Duration::from_secs(10))
        .build()?;

    let page = client.messages(0, 20).await?;
    println!("MailHog holds {} message(s), showing {}", page.total, page.count);
    for msg in &page.items {
        println!(
            "{}  {} -> {}  {}",
            msg.id,
            msg.from.address(),
            msg.to.iter().map(|p| p.address()).collect::<Vec<_>>().join(", "),
            msg.subject().unwrap_or("(no subject)")
        );
    }

    if let Some(first) = page.items.first() {
        let full = client.message(&first.id).await?;
        println!("\n--- {} ---\n{}", full.id, full.content.body);

        let sender = full.from.address();
        let same_sender = client.search(SearchKind::From, &sender, 0, 50).await?;
        println!("\n{} message(s) from {}", same_sender.total, sender);
    }

    Ok(())
}
