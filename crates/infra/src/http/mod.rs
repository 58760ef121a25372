//! Outbound HTTP plumbing shared by the Graph and EWS adapters

pub mod client;

pub use client::{HttpClient, HttpClientBuilder, RetryPolicy};
