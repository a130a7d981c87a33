use std::collections::HashMap;
use std::io::Read;
use std::sync::Arc;

use iron::headers::ContentType;
use iron::modifiers::RedirectRaw;
use iron::{status, AfterMiddleware, Handler, IronResult, Request, Response};
use log::{debug, error, info};
use router::Router;
use url::form_urlencoded;

use crate::database::NewsStore;
use crate::error::NewsError;
use crate::feed;
use crate::model::parse_id;
use crate::pages;

pub const FEED_PATH: &str = "/news/";

/// Match a `Result` into its inner value or return the response
/// matching the `NewsError`, or the provided status for any other
/// error using the second variant of this macro.
macro_rules! try_handler {
    ( $e:expr ) => {
        match $e {
            Ok(x) => x,
            Err(e) => return Ok(error_response(&e)),
        }
    };
    ( $e:expr, $error:expr ) => {
        match $e {
            Ok(x) => x,
            Err(e) => {
                error!("{}", e);
                return Ok(Response::with(($error, e.to_string())));
            }
        }
    };
}

/// Get the value of a parameter in the URI.
/// If the parameter was absent, return `400 Bad Request`.
/// If we could not obtain the parameter list, return `500 Internal Server Error`.
macro_rules! get_http_param {
    ( $r:expr, $e:expr ) => {
        match $r.extensions.get::<Router>() {
            Some(router) => match router.find($e) {
                Some(val) => val,
                None => return Ok(Response::with(status::BadRequest)),
            },
            None => return Ok(Response::with(status::InternalServerError)),
        }
    };
}

fn error_response(err: &NewsError) -> Response {
    match err {
        NewsError::NotFound(id) => {
            debug!("no news item {}", id);
            Response::with(status::NotFound)
        }
        NewsError::StorageUnavailable { .. } => {
            error!("{}", err);
            Response::with((status::InternalServerError, err.to_string()))
        }
    }
}

fn redirect_to_feed() -> Response {
    Response::with((status::Found, RedirectRaw(FEED_PATH.to_string())))
}

/// Decodes `application/x-www-form-urlencoded` pairs. A repeated key keeps
/// its last value.
fn form_fields(encoded: &[u8]) -> HashMap<String, String> {
    form_urlencoded::parse(encoded).into_owned().collect()
}

/// The decoded `q` search term of a request's query string, empty when
/// there is none.
fn query_param(url_query: Option<&str>) -> String {
    url_query
        .map(|raw| form_fields(raw.as_bytes()))
        .and_then(|mut params| params.remove("q"))
        .unwrap_or_default()
}

pub struct Handlers {
    pub index: IndexHandler,
    pub feed: FeedHandler,
    pub create_form: CreateFormHandler,
    pub create: CreateHandler,
    pub news_item: NewsItemHandler,
}

impl Handlers {
    pub fn new(store: NewsStore) -> Handlers {
        let store = Arc::new(store);
        Handlers {
            index: IndexHandler,
            feed: FeedHandler::new(store.clone()),
            create_form: CreateFormHandler,
            create: CreateHandler::new(store.clone()),
            news_item: NewsItemHandler::new(store),
        }
    }

    pub fn into_router(self) -> Router {
        let mut router = Router::new();
        router.get("/", self.index, "index");
        router.get(FEED_PATH, self.feed, "feed");
        router.get("/news/create/", self.create_form, "create_form");
        router.post("/news/create/", self.create, "create");
        router.get("/news/:id/", self.news_item, "news_item");
        router
    }
}

pub struct IndexHandler;

impl Handler for IndexHandler {
    fn handle(&self, _: &mut Request) -> IronResult<Response> {
        Ok(redirect_to_feed())
    }
}

pub struct FeedHandler {
    store: Arc<NewsStore>,
}

impl FeedHandler {
    fn new(store: Arc<NewsStore>) -> FeedHandler {
        FeedHandler { store }
    }
}

impl Handler for FeedHandler {
    fn handle(&self, req: &mut Request) -> IronResult<Response> {
        let query = query_param(req.url.query());

        let news = try_handler!(self.store.load());
        let days = feed::group_by_day(news, &query);
        Ok(Response::with((status::Ok, pages::feed_page(&days, &query))))
    }
}

pub struct CreateFormHandler;

impl Handler for CreateFormHandler {
    fn handle(&self, _: &mut Request) -> IronResult<Response> {
        Ok(Response::with((status::Ok, pages::create_page())))
    }
}

pub struct CreateHandler {
    store: Arc<NewsStore>,
}

impl CreateHandler {
    fn new(store: Arc<NewsStore>) -> CreateHandler {
        CreateHandler { store }
    }
}

impl Handler for CreateHandler {
    fn handle(&self, req: &mut Request) -> IronResult<Response> {
        let mut payload = Vec::new();
        try_handler!(req.body.read_to_end(&mut payload), status::InternalServerError);

        let fields = form_fields(&payload);
        let title = fields.get("title").map(String::as_str);
        let text = fields.get("text").map(String::as_str);

        let item = try_handler!(self.store.create(title, text));
        info!("created news item {} on {}", item.link(), item.created());
        Ok(redirect_to_feed())
    }
}

pub struct NewsItemHandler {
    store: Arc<NewsStore>,
}

impl NewsItemHandler {
    fn new(store: Arc<NewsStore>) -> NewsItemHandler {
        NewsItemHandler { store }
    }
}

impl Handler for NewsItemHandler {
    fn handle(&self, req: &mut Request) -> IronResult<Response> {
        // Anything but a run of digits is an unknown page.
        let id = match parse_id(get_http_param!(req, "id")) {
            Some(id) => id,
            None => return Ok(Response::with(status::NotFound)),
        };

        let item = try_handler!(self.store.find(id));
        Ok(Response::with((status::Ok, pages::item_page(&item))))
    }
}

/// Marks every response without a content type as HTML.
pub struct HtmlAfterMiddleware;

impl AfterMiddleware for HtmlAfterMiddleware {
    fn after(&self, _: &mut Request, mut res: Response) -> IronResult<Response> {
        if !res.headers.has::<ContentType>() {
            res.headers.set(ContentType::html());
        }
        Ok(res)
    }
}
