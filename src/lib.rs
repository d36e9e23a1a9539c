//! # Mission Control
//!
//! A flat-file dashboard backend for an automation agent's workspace.
//!
//! The agent writes dated markdown notes and a handful of named documents;
//! Mission Control derives JSON snapshots from them offline and serves a
//! small read-only API on top, including a live substring search with a
//! frequency-based relevance score.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌──────────────┐   ┌───────────────┐
//! │  Workspace  │──▶│     Sync      │──▶│  Snapshots    │
//! │ notes + docs│   │ classify+index│   │ (JSON files)  │
//! └──────┬──────┘   └──────────────┘   └──────┬────────┘
//!        │                                    │
//!        │ live search        ┌───────────────┤
//!        ▼                    ▼               ▼
//!   ┌──────────┐        ┌──────────┐    ┌──────────┐
//!   │   CLI    │        │   HTTP   │    │   CLI    │
//!   │ (search) │        │  (serve) │    │ (stats)  │
//!   └──────────┘        └──────────┘    └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! mc sync                       # rebuild the JSON snapshots
//! mc search "deployment"        # live search over the workspace
//! mc stats                      # snapshot overview
//! mc serve                      # start the dashboard API
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`notes`] | Dated note discovery |
//! | [`index`] | Content index builder |
//! | [`classify`] | Activity line classifier |
//! | [`search`] | Relevance search over files or index |
//! | [`jobs`] | Job snapshot roll-forward |
//! | [`snapshot`] | Atomic snapshot file I/O |
//! | [`stats`] | Derived stats and overview command |
//! | [`sync`] | Offline snapshot rebuild |
//! | [`server`] | Dashboard HTTP API |

pub mod classify;
pub mod config;
pub mod index;
pub mod jobs;
pub mod models;
pub mod notes;
pub mod search;
pub mod server;
pub mod snapshot;
pub mod stats;
pub mod sync;
