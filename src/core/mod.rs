//! # Core Application Logic
//!
//! This module contains EduHub's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Catalog (content)    │
//!                    │  • Quiz sessions        │
//!                    │  • Downloads directory  │
//!                    │  • update() (reducer)   │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │  Fetcher   │      │  Launcher  │
//!     │  Adapter   │      │  (reqwest) │      │ (xdg-open) │
//!     │ (ratatui)  │      │            │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Subjects, topics, resources and quiz banks, read-only
//! - [`quiz`]: One quiz run: shuffled questions, scoring, tiers
//! - [`downloads`]: The downloads directory and the HTTP fetcher
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`config`]: `~/.eduhub/config.toml` plus env and CLI overrides

pub mod action;
pub mod catalog;
pub mod config;
mod content;
pub mod downloads;
pub mod launcher;
pub mod quiz;
pub mod state;
