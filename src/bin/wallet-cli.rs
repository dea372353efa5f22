use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "wallet-cli")]
#[command(about = "Command-line client for the wallet gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign and submit a transfer through the gateway
    Send {
        /// Sender blockchain address
        #[arg(long)]
        from: String,
        /// Recipient blockchain address
        #[arg(long)]
        to: String,
        /// Sender public key (128 hex chars)
        #[arg(long)]
        public_key: String,
        /// Sender private key (64 hex chars); prefer WALLET_PRIVATE_KEY
        #[arg(long, env = "WALLET_PRIVATE_KEY", hide_env_values = true)]
        private_key: String,
        /// Amount to transfer
        #[arg(long)]
        value: String,
    },
    /// Show the balance of a blockchain address
    Balance {
        #[arg(long)]
        address: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Send { from, to, public_key, private_key, value } => {
            client.post(format!("{}/transaction", base))
                .json(&json!({
                    "sender_blockchain_address": from,
                    "recipient_blockchain_address": to,
                    "sender_public_key": public_key,
                    "sender_private_key": private_key,
                    "value": value,
                }))
                .send()
                .await?
        }
        Commands::Balance { address } => {
            client.get(format!("{}/wallet/amount", base))
                .query(&[("blockchain_address", address)])
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: gateway returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("{}", text);
        }
        std::process::exit(1);
    }

    let body: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&body)?);

    if body.get("message").and_then(Value::as_str) != Some("success") {
        std::process::exit(2);
    }
    Ok(())
}
