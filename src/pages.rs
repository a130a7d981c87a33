//! HTML for the three pages the site serves.

use crate::feed::DayBucket;
use crate::model::NewsItem;

pub const FEED_TITLE: &str = "Hyper news";

pub fn feed_page(days: &[DayBucket], query: &str) -> String {
    let mut body = format!(
        "<h2>{title}</h2>\n\
         <form action=\"/news/\" method=\"get\">\
         <input type=\"text\" name=\"q\" value=\"{query}\">\
         <button type=\"submit\">Search</button></form>\n",
        title = FEED_TITLE,
        query = escape(query),
    );

    for day in days {
        body.push_str(&format!("<h4>{}</h4>\n<ul>\n", escape(day.date())));
        for item in day.items() {
            body.push_str(&format!(
                "<li><a href=\"/news/{}/\">{}</a></li>\n",
                escape(item.link()),
                escape(item.title().unwrap_or_default()),
            ));
        }
        body.push_str("</ul>\n");
    }

    body.push_str("<a href=\"/news/create/\">Create news</a>\n");
    document(FEED_TITLE, &body)
}

pub fn item_page(item: &NewsItem) -> String {
    let title = escape(item.title().unwrap_or_default());
    let body = format!(
        "<h2>{title}</h2>\n<p>{created}</p>\n<p>{text}</p>\n<a href=\"/news/\">Main page</a>\n",
        title = title,
        created = escape(item.created()),
        text = escape(item.text().unwrap_or_default()),
    );
    document(&title, &body)
}

pub fn create_page() -> String {
    document(
        "Create news",
        "<form action=\"/news/create/\" method=\"post\">\n\
         <input type=\"text\" name=\"title\">\n\
         <textarea name=\"text\"></textarea>\n\
         <button type=\"submit\">Create</button>\n\
         </form>\n",
    )
}

// `title` must already be escaped.
fn document(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{}</body>\n</html>\n",
        title, body
    )
}

pub fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
