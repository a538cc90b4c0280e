//! # erpkit-core: Pure Logic Behind the ERP Client Scripts
//!
//! The pieces of the ERP form customizations that do not depend on the
//! framework: sequential catalog codes, label casing, and conflict checks
//! over editable tables. Everything here is a pure function or an
//! in-memory value type.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         erpkit Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 ERP client scripts (forms, lists)               │   │
//! │  │    Item Attribute form ──► Roster table ──► Shift table         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON (ts-rs bindings)                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    erpkit-cli                                   │   │
//! │  │    next-code, proper-case, check-overlaps, aggregate            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ erpkit-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐           │   │
//! │  │   │   code   │ │   case   │ │ overlap  │ │ catalog  │           │   │
//! │  │   │ base-36  │ │ Proper   │ │ pairwise │ │ values + │           │   │
//! │  │   │ counter  │ │ Case     │ │ conflicts│ │ codes    │           │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘           │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`code`] - Fixed-width base-36 sequential codes
//! - [`case`] - Proper case normalization of labels
//! - [`overlap`] - Duplicate and overlap detection over keyed ranges
//! - [`category`] - Attribute categories and their settings table
//! - [`catalog`] - In-memory attribute value catalog
//! - [`grouping`] - Quantity totals per group
//! - [`session`] - Editing session context
//! - [`validation`] - Input validators
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use erpkit_core::{next_code, to_proper_case};
//!
//! assert_eq!(next_code("00Z"), "010");
//! assert_eq!(to_proper_case("red color"), "Red Color");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod case;
pub mod catalog;
pub mod category;
pub mod code;
pub mod error;
pub mod grouping;
pub mod overlap;
pub mod session;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use case::to_proper_case;
pub use catalog::{AttributeCatalog, AttributeValue};
pub use category::{AttributeCategory, CategoryConfig, CategoryTable};
pub use code::{next_code, Code, CodeAdvance, CodePolicy, NextCode};
pub use error::{CodeError, CoreError, CoreResult, ValidationError};
pub use grouping::{aggregate_quantities, GroupLine, GroupTotal};
pub use overlap::{
    find_duplicate_keys, find_duplicates_and_overlaps, ConflictDescriptor, ConflictKind, Entry,
    OverlapPolicy, Span,
};
pub use session::{EditSession, SessionSummary};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Longest attribute value accepted, in characters.
pub const MAX_ATTRIBUTE_VALUE_LEN: usize = 140;

/// Widest code whose base-36 value still fits in a u64 (36^12 < 2^64).
pub const MAX_CODE_WIDTH: usize = 12;
