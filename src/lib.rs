// Pedantic: suppress noise for internal crate code.
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]

pub mod catalog;
pub mod config;
pub mod facet;
pub mod feed;
pub mod filter;
pub mod html;
pub mod markdown;
pub mod render;
pub mod server;
pub mod site;
