//! HTTP API handlers for capcloud

pub mod buildinfo;
pub mod cloud;
pub mod gallery;
pub mod health;
pub mod ui;
pub mod upload;

pub use buildinfo::get_build_info;
pub use cloud::get_wordcloud;
pub use gallery::{cleanup, get_detail, get_gallery};
pub use health::health_routes;
pub use ui::{serve_app_js, serve_index};
pub use upload::upload;
