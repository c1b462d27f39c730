use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "harness-cli")]
#[command(about = "Drive a running chaos harness", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:4444")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the health check and print the result
    Status,
    /// Set healthy=false (recovers on restart)
    Break,
    /// Set manual_config=invalid (needs an operator edit of the state file)
    BreakManual,
    /// Schedule the recurring auto-break job
    AddCron,
    /// Remove the recurring auto-break job
    RemoveCron,
    /// Start, stop or restart a remote container
    Container {
        /// Container name (must be on the harness allow-list)
        name: String,
        /// One of start, stop, restart
        state: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Status => client.get(format!("{}/", base)).send().await?,
        Commands::Break => client.get(format!("{}/break", base)).send().await?,
        Commands::BreakManual => client.get(format!("{}/breakManual", base)).send().await?,
        Commands::AddCron => client.get(format!("{}/addcron", base)).send().await?,
        Commands::RemoveCron => client.get(format!("{}/removecron", base)).send().await?,
        Commands::Container { name, state } => {
            client
                .post(format!("{}/docker-state", base))
                .json(&json!({ "container": name, "state": state }))
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    let body = match serde_json::from_str::<Value>(&text) {
        Ok(json) => serde_json::to_string_pretty(&json)?,
        Err(_) => text,
    };

    if status.is_success() {
        println!("{}", body);
    } else {
        eprintln!("Error: harness returned status {}", status);
        eprintln!("Response: {}", body);
        std::process::exit(1);
    }
    Ok(())
}
