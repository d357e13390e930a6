use anyhow::Result;
use base::notifier::LogNotifier;
use base::requests::ureq::UreqRequestApi;
use base::settings::Settings;
use base::storage::FileLocalStorage;
use cart::CartStore;
use clap::Parser;
use storefront_api::HttpStorefrontApi;

mod commands;
mod logging;

fn main() -> Result<()> {
    let cli = commands::Cli::parse();

    let settings = Settings::from_env()?;
    logging::init_logger(&settings)?;

    let storage = FileLocalStorage::new(&settings.storage_dir)?;
    let request_api = UreqRequestApi::new();
    let api = HttpStorefrontApi::new(&settings, &request_api, &storage);
    let notifier = LogNotifier::new(&settings.target_logger);

    let mut cart = CartStore::init(&storage, &settings.target_logger);

    let res = commands::run(cli.command, &mut cart, &api, &notifier);

    cart.teardown()?;
    res
}
