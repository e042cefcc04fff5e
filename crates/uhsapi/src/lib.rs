//! UHS API (Universal Http Server API)
//! is a project which aims to create a universal facade API for http servers,
//! allowing developers to create universal features which will work for many server backends,
//! such as carbon_http_line, actix, etc...
//!
//! It only holds the protocol vocabulary (methods and versions) shared by those backends.

pub mod http;
