pub mod client;
pub mod csrf;
pub mod worker;

pub use client::SupportApi;
pub use worker::ApiWorker;
