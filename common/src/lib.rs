//! Almanbar Common – content model and backend access shared by the web
//! server and the WASM client.
//!
//! The model, bilingual strings, portfolio helpers and session types
//! compile everywhere. Everything that talks to the hosted backend sits
//! behind the `backend` feature (on by default, off for the client). The
//! in-memory backend is only built for tests or with `testing`.

pub mod error;
pub mod i18n;
pub mod model;
pub mod portfolio;
pub mod session;
pub mod state;

cfg_if::cfg_if! {
    if #[cfg(feature = "backend")] {
        pub mod admin;
        pub mod auth;
        pub mod backend;
        pub mod cache;
        pub mod config;
        pub mod contact;
        pub mod media;
        #[cfg(any(test, feature = "testing"))]
        pub mod memory;
        pub mod queries;
        pub mod rest;
    }
}
