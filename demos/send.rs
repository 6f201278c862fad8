//! Send a sandbox email with an attachment.
//!
//! ```sh
//! SENDSCULPT_API_KEY=... cargo run --example send -- you@example.com
//! ```

use sendsculpt::{Attachment, ClientBuilder, EmailMessage, Environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let recipient = std::env::args()
        .nth(1)
        .ok_or("usage: send <recipient>")?;

    let client = ClientBuilder::from_env()?
        .environment(Environment::Sandbox)
        .build()?;
    println!("Using {} ({})", client.base_url(), client.environment());

    let message = EmailMessage::new("noreply@example.com", [recipient], "Hello from sendsculpt")
        .sender_name("SendSculpt Demo")
        .body_html("<p>This message was sent from the Rust client.</p>")
        .body_text("This message was sent from the Rust client.")
        .attachment(Attachment::from_bytes(
            "hello.txt",
            "text/plain",
            b"hello, attachment".to_vec(),
        ));

    let result = client.send_email(&message).await?;
    println!("Sent: {} ({})", result.message_id, result.status);
    Ok(())
}
