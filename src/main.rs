use std::error::Error;

use iron::prelude::Chain;
use iron::Iron;
use log::info;
use logger::Logger;

use hypernews::database::NewsStore;
use hypernews::handlers::{Handlers, HtmlAfterMiddleware};
use hypernews::settings::Settings;

// RUST_LOG=info,logger=info hypernews > logs 2>&1 &
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let (logger_before, logger_after) = Logger::new(None);

    let settings = Settings::new()?;
    info!("settings: {:?}", settings);

    let store = NewsStore::open(&settings.news_json_path)?;
    info!("serving news from {}", store.path().display());

    let router = Handlers::new(store).into_router();

    let mut chain = Chain::new(router);
    chain.link_before(logger_before); // Should be first!
    chain.link_after(HtmlAfterMiddleware);
    chain.link_after(logger_after); // Should be last!

    info!("listening on {}", settings.bind_address);
    Iron::new(chain).http(settings.bind_address.as_str())?;
    Ok(())
}
