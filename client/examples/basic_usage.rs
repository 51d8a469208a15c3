use std::process::exit;

use interfax_client::{
    ClientConfig, ClientError, Content, InterfaxClient, ListOptions, Result,
    SendOptions, SortOrder, UploadSessionOptions,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Expect the destination fax number as the first argument and the path
    // of a PDF to send as the second. Credentials come from the environment.
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <fax_number> <document.pdf>", args[0]);
        exit(1);
    }

    let config = ClientConfig::from_env().unwrap_or_else(|err| {
        eprintln!("Invalid configuration: {}", err);
        exit(1);
    });
    if config.credentials.is_none() {
        eprintln!("INTERFAX_USERNAME and INTERFAX_PASSWORD are not set");
        exit(1);
    }
    let client = InterfaxClient::new(config)?;

    let balance = client.account().balance().await?;
    println!("Account balance: {:.2}", balance);

    let document = std::fs::read(&args[2]).unwrap_or_else(|err| {
        eprintln!("Cannot read {}: {}", args[2], err);
        exit(1);
    });

    // Keep a copy on the server as well, uploaded in 256 KiB chunks.
    let options = UploadSessionOptions::new(document.len() as u64, "document.pdf");
    let session = client
        .documents()
        .upload(&options, &document, 256 * 1024)
        .await?;
    let uploaded = client.documents().get(&session).await?;
    println!(
        "Uploaded session {}: {:?} of {:?} bytes",
        session, uploaded.document_bytes_uploaded, uploaded.document_bytes_size
    );

    let fax_id = client
        .outbound()
        .send(
            Content::new("application/pdf", document),
            &SendOptions::new(&args[1]),
        )
        .await?;
    println!("Submitted fax {}", fax_id);

    let fax = client.outbound().get(fax_id).await?;
    println!("Fax {} status: {:?}", fax.id, fax.status);

    let recent = client
        .outbound()
        .list(&ListOptions {
            limit: Some(5),
            sort_order: Some(SortOrder::Descending),
            ..Default::default()
        })
        .await?;
    for fax in &recent {
        println!("- {} -> {:?}", fax.id, fax.destination_fax);
    }

    match client.outbound().cancel(fax_id).await {
        Ok(reason) => println!("Cancelled fax {}: {}", fax_id, reason),
        Err(ClientError::Api { status, error }) => {
            println!("Could not cancel fax {} (HTTP {}): {}", fax_id, status, error)
        }
        Err(err) => return Err(err),
    }

    client.documents().cancel(&session).await?;
    Ok(())
}
