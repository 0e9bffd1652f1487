use clap::Parser;

/// Fetch a speech service token from a running relay and print it.
#[derive(Parser)]
#[command(name = "token-cli")]
#[command(about = "Request a speech token from the relay", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Print status and response headers to stderr.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let endpoint = format!(
        "{}/api/getSpeechToken",
        cli.url.trim_end_matches('/')
    );
    let res = client.post(&endpoint).send().await?;

    let status = res.status();
    if cli.verbose {
        eprintln!("{} {}", status, endpoint);
        for (name, value) in res.headers() {
            eprintln!("{}: {}", name, value.to_str().unwrap_or("<binary>"));
        }
    }

    let body = res.text().await?;
    if !status.is_success() {
        eprintln!("Error: relay returned status {}", status);
        eprintln!("{}", body);
        std::process::exit(1);
    }

    println!("{}", body);
    Ok(())
}
