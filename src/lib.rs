//! hooksend: post text messages to a Discord channel through an incoming webhook.
//!
//! The library is split into a transport layer ([`webhook`]), the Discord
//! webhook rules ([`discord`]), and the pieces a front end needs around them:
//! persisted settings ([`settings`]), message history ([`history`]) and an
//! explicit [`session::Session`] context.

pub mod config;
pub mod discord;
pub mod history;
pub mod session;
pub mod settings;
pub mod webhook;
