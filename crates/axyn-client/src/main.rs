//! Axyn Contact - send the contact form from the command line.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use axyn_client::{BannerKind, ContactClient, ContactFormState, DEFAULT_API_URL, FormFields};

/// Submit a message through the Axyn contact form.
#[derive(Parser, Debug)]
#[command(name = "axyn-contact")]
#[command(about = "Submit the Axyn contact form", long_about = None)]
struct Args {
    /// Backend origin.
    #[arg(long, env = "AXYN_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    #[arg(long)]
    name: String,

    #[arg(long)]
    email: String,

    #[arg(long)]
    message: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let client = ContactClient::new(args.api_url);
    let mut form = ContactFormState::new(FormFields {
        name: args.name,
        email: args.email,
        message: args.message,
    });

    tracing::debug!(origin = client.origin(), "submitting contact form");
    let banner = form.submit(&client).await;

    match banner.kind() {
        BannerKind::Success => {
            println!("{}", banner.text());
            Ok(ExitCode::SUCCESS)
        }
        BannerKind::Error => {
            eprintln!("{}", banner.text());
            Ok(ExitCode::FAILURE)
        }
    }
}
