mod collapser;
mod config;
mod fetch;
mod list;
mod store;

use std::process::exit;

use ipnetwork::Ipv4Network;
use thiserror::Error;

use config::Config;
use store::Store;

#[derive(Debug, Error)]
enum AppError {
    #[error("{0}")]
    Fetch(fetch::FetchError),

    #[error("{0}")]
    Parse(list::ParseError),

    #[error("{0}")]
    Store(store::StoreError),
}

fn main() {
    if let Err(err) = run(Config::from_env()) {
        eprintln!("fatal: {}", err);
        exit(1);
    }
}

fn run(config: Config) -> Result<(), AppError> {
    eprintln!("Fetching {} from {}", config.list_name, config.download_url);
    let body = fetch::download(&config.download_url).map_err(AppError::Fetch)?;

    let store = Store::new(config::DATA_DIR).map_err(AppError::Store)?;
    store
        .write_snapshot(&config.snapshot_file(), &body)
        .map_err(AppError::Store)?;

    let blocklist = list::parse(&body).map_err(AppError::Parse)?;
    let collapsed = collapser::collapse(blocklist.annotations.keys().copied());

    let entries: Vec<(Ipv4Network, String)> = collapsed
        .iter()
        .map(|block| {
            let comment = collapser::comment_for(block, &blocklist.annotations);
            (*block, comment.to_owned())
        })
        .collect();

    store
        .write_collapsed(&config.collapsed_file(), &blocklist.comments, &entries)
        .map_err(AppError::Store)?;

    eprintln!(
        "{} prefixes collapsed into {} blocks",
        blocklist.annotations.len(),
        collapsed.len()
    );

    Ok(())
}
