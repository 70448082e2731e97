use std::net::SocketAddr;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use hr_client::{create_client, ClientConfig, DEFAULT_BACKEND_URL};
use hr_page::Page;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

mod logging;
mod render;
mod repl;

use repl::Command;

#[derive(Parser, Debug)]
#[command(author, version, about = "Rewrite news headlines and see how their sentiment shifts", long_about = None)]
pub struct Cli {
    /// Base URL of the scoring backend
    #[arg(long, env = "HEADLINE_BACKEND_URL", default_value = DEFAULT_BACKEND_URL)]
    backend_url: String,
    /// Default log filter when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
    /// Print the page as HTML instead of an outline
    #[arg(long)]
    html: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open the compose page and drive it from stdin
    Compose,
    /// Show every headline you have rewritten
    History,
    /// Run the in-memory stub backend
    Stub {
        #[arg(long, default_value = "127.0.0.1:5000")]
        addr: SocketAddr,
    },
}

fn print_page(page: &Page, html: bool) {
    if html {
        println!("{}", page.to_html());
    } else {
        println!("{}", render::outline(page));
    }
}

async fn compose(client: Arc<dyn hr_client::ScoringClient>, html: bool) -> anyhow::Result<()> {
    let mut page = Page::open(client.clone(), "/").await?;
    print_page(&page, html);
    println!("{}", repl::HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match repl::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                eprintln!("{}", message);
                continue;
            }
        };
        match command {
            Command::Quit => break,
            Command::Help => println!("{}", repl::HELP),
            Command::History => {
                let history = Page::open(client.clone(), "/rewrites").await?;
                print_page(&history, html);
            }
            command => {
                if let Err(e) = repl::execute(&mut page, &command).await {
                    eprintln!("{}", e);
                }
                print_page(&page, html);
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level);

    match cli.command {
        Commands::Stub { addr } => {
            hr_stub::serve(addr, hr_stub::AppState::seeded()).await?;
        }
        Commands::Compose => {
            let client = create_client(ClientConfig::new(&cli.backend_url)?)?;
            info!("🔌 Using backend {}", cli.backend_url);
            compose(client, cli.html).await?;
        }
        Commands::History => {
            let client = create_client(ClientConfig::new(&cli.backend_url)?)?;
            let page = Page::open(client, "/rewrites").await?;
            print_page(&page, cli.html);
        }
    }
    Ok(())
}
