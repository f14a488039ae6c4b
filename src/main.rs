mod api;
mod catalog;
mod config;
mod opentdb;
mod session;
mod text;
mod ui;

use dotenv::dotenv;
use reqwest::Client;

use api::TriviaClient;

// Error type shared by the interactive front-end
type Error = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() {
    dotenv().ok();
    pretty_env_logger::init();

    let client = TriviaClient::from_env(Client::new());

    if let Err(error) = ui::run(client).await {
        eprintln!("Fatal error: {error}");
        std::process::exit(1);
    }
}
