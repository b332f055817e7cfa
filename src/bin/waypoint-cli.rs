use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "waypoint-cli")]
#[command(about = "Inspect a running waypoint server", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[arg(short, long, default_value = "/api")]
    prefix: String,

    /// Path of the generated API document.
    #[arg(long, default_value = "/swagger/v1/swagger.json")]
    docs_path: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the generated Swagger document
    Docs,
    /// List executed queries and commands
    Events,
    /// Show how many times the contact list was queried
    Count,
    /// List contacts, optionally filtered by name
    Contacts {
        #[arg(short, long)]
        search: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');
    let api = format!("{}/{}", base, cli.prefix.trim_matches('/'));

    let request = match &cli.command {
        Commands::Docs => client.get(format!("{}{}", base, cli.docs_path)),
        Commands::Events => client.get(format!("{}/events", api)),
        Commands::Count => client.get(format!("{}/count", api)),
        Commands::Contacts { search: None } => client.get(format!("{}/contacts", api)),
        Commands::Contacts { search: Some(value) } => client
            .get(format!("{}/contacts/search", api))
            .query(&[("value", value)]),
    };

    let res = request.send().await?;
    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: server returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
