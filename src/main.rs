use clap::Parser;

use encyclopedia::logger::Logger;
use encyclopedia::{Config, WikiError};

#[tokio::main]
async fn main() -> Result<(), WikiError> {
    let config = Config::parse();
    if let Err(e) = Logger::init(&config) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    encyclopedia::serve(&config).await
}
