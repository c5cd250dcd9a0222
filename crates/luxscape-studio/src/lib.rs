//! # luxscape-studio: Design Session Layer for LuxScape
//!
//! This crate owns the mutable state of one design-in-progress and mediates
//! every call into the pure engine in `luxscape-core`.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     LuxScape Session Layer                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 luxscape-studio (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │  ┌──────────────┐  ┌──────────────┐  ┌─────────────────────┐   │   │
//! │  │  │ DesignSession│  │ SessionError │  │ QuoteTotals        │   │   │
//! │  │  │ (session.rs) │  │ (error.rs)   │  │ (totals.rs)        │   │   │
//! │  │  │              │  │              │  │                    │   │   │
//! │  │  │ Arc<Mutex>   │  │ code +       │  │ subtotal, tax,     │   │   │
//! │  │  │ over editor  │  │ message for  │  │ discount, grand    │   │   │
//! │  │  │ and notes    │  │ the frontend │  │ total for display  │   │   │
//! │  │  └──────────────┘  └──────────────┘  └─────────────────────┘   │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  DEPENDENCIES:                 ▼                                        │
//! │  • luxscape-core: catalog, selection FSM, compiler, resolver, quotes   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```rust
//! use luxscape_studio::DesignSession;
//! use luxscape_core::types::FixtureKind;
//!
//! let session = DesignSession::standard();
//!
//! session.toggle_fixture(FixtureKind::Path).unwrap();
//! session.set_notes("warm light, nothing harsh").unwrap();
//!
//! let prompt = session.compile_prompt().unwrap();
//! assert!(prompt.render().contains("Add path lighting"));
//! ```

pub mod error;
pub mod session;
pub mod totals;

pub use error::{ErrorCode, SessionError};
pub use session::{DesignSession, DesignSnapshot};
pub use totals::QuoteTotals;
