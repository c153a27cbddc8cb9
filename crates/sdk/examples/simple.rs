//! Simple SDK Example
//!
//! Demonstrates the session lifecycle and a few admin calls.
//!
//! # Usage
//!
//! ```bash
//! MAILBOX_USER=admin@example.org MAILBOX_PASS=secret cargo run --example simple
//! ```

use mailboxctl_sdk::{ClientConfig, MailboxClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Mailboxctl SDK - Simple Example");
    println!("================================\n");

    let user = std::env::var("MAILBOX_USER")?;
    let pass = std::env::var("MAILBOX_PASS")?;

    // 1. Authenticate and cache the session
    println!("1. Authenticating...");
    let client = MailboxClient::new(ClientConfig::default())?;
    let credentials = client.authenticate(&user, &pass).await?;
    println!("   ✓ Logged in (level: {})\n", credentials.auth_level);

    // 2. List domains of the account
    println!("2. Listing domains...");
    let domains = client.domain_list(None).await?;
    println!("   {domains}\n");

    // 3. Ping the API
    println!("3. hello.world...");
    let greeting = client.hello_world().await?;
    println!("   {greeting}\n");

    // 4. Log out and drop the cached session
    println!("4. Logging out...");
    let logged_out = client.deauthenticate().await?;
    println!("   ✓ Remote logout reported: {logged_out}");

    Ok(())
}
