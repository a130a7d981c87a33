//! HyperNews: a small news site backed by a single JSON file.

pub mod database;
pub mod error;
pub mod feed;
pub mod handlers;
pub mod model;
pub mod pages;
pub mod settings;
