//! Carton - The artist's toolbox for Sinopia.
//!
//! Shared building blocks used by every Sinopia crate, the way a carton
//! (artist's portfolio case) holds the tools needed before any drawing starts.
//!
//! # Modules
//!
//! - **member_list**: ordered, duplicate-free name lists
//! - **trace**: the explicit logger handed to every analysis component
//! - **naming**: case conversion helpers shared by extraction and matching
//!
//! # Example
//!
//! ```
//! use sinopia_carton::MemberList;
//!
//! let mut list = MemberList::new();
//! list.push("change");
//! list.push("submit");
//! list.push("change");
//! assert_eq!(list.as_slice(), ["change", "submit"]);
//! ```

pub mod member_list;
pub mod naming;
pub mod trace;

pub use member_list::MemberList;
pub use naming::{camelize, event_from_handler};
pub use trace::{MissKind, ResolveMiss, Tracer};

// Re-export compact_str::CompactString for convenience
pub use compact_str::CompactString;

// Re-export rustc-hash for fast hash maps/sets
pub use rustc_hash::{FxHashMap, FxHashSet};
