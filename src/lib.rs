pub mod cli;
pub mod config;
pub mod errors;
pub mod keywords;
pub mod provider;
pub mod relevance;
pub mod research;
pub mod storage;
#[cfg(test)]
mod tests;
pub mod web;
