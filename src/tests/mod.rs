mod config;
mod relevance;
mod research;
