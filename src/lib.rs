//! Beanlink - a Shopee affiliate link converter
//!
//! This library provides the core functionality for the beanlink tool:
//! rewriting Shopee product URLs into affiliate-tagged links, shortening
//! them through a third-party API, and drafting marketing copy for a link
//! through a generative-language API.
//!
//! # Architecture
//! - `converter`: pure link transformation and the conversion session
//! - `services`: external collaborators (URL shortener, copy generator)
//! - `config`: affiliate configuration and environment loading
//! - `interfaces`: user interfaces (CLI)
//! - `system`: logging initialization

pub mod cli;
pub mod config;
pub mod converter;
pub mod errors;
pub mod interfaces;
pub mod services;
pub mod system;
