mod client;

pub use client::TokenClient;
