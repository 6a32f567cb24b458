//! # sinopia_croquis
//!
//! Croquis - The component surface extractor for Sinopia.
//!
//! ## Name Origin
//!
//! **Croquis** (/kʁɔ.ki/) is a quick sketch that keeps only the essential
//! lines of a subject. `sinopia_croquis` sketches a Vue component the same
//! way: it ignores the implementation and keeps what a consumer can touch.
//!
//! ## Purpose
//!
//! Given a component module (`.vue`, `.ts`, `.js`, ...), extract:
//!
//! - **inputs**: props, including `defineModel` bindings
//! - **events**: declared emits, including `update:*` model events
//! - **slots**: declared slots
//! - **exposedMembers**: members made public through `expose`
//!
//! Declarations spread or imported from other modules are chased through
//! their import chain with [`CrossModuleLookup`].
//!
//! ## Architecture
//!
//! ```text
//!   parse (oxc)
//!        ↓
//!   imports ──→ lookup (other modules)
//!        ↓          ↑
//!   strategy ──→ normalize
//!        ↓
//!   ComponentSurface
//! ```
//!
//! ## Example
//!
//! ```
//! use std::path::Path;
//! use sinopia_carton::Tracer;
//! use sinopia_croquis::{MemoryHost, NodeResolver, SurfaceExtractor};
//!
//! let host = MemoryHost::new();
//! let resolver = NodeResolver::new();
//! let tracer = Tracer::quiet();
//! let extractor = SurfaceExtractor::new(&host, &resolver, &tracer);
//!
//! let surface = extractor
//!     .extract_source(
//!         Path::new("/src/Button.vue"),
//!         r#"<script setup lang="ts">
//! defineProps<{ label: string }>()
//! defineEmits(['click'])
//! </script>"#,
//!     )
//!     .unwrap();
//! assert_eq!(surface.inputs.as_slice(), ["label"]);
//! assert_eq!(surface.events.as_slice(), ["click"]);
//! ```

// Syntax helpers
pub mod ast;
pub mod parse;
pub mod sfc;
pub mod walk;

// Module graph
pub mod host;
pub mod imports;
pub mod lookup;

// Extraction
pub mod category;
pub mod normalize;
pub mod strategy;
pub mod surface;

mod error;

pub use category::Category;
pub use error::{ExtractError, ExtractResult};
pub use host::{MemoryHost, ModuleHost, NodeResolver, OsHost, PathResolver, DEFAULT_EXTENSIONS};
pub use imports::{collect_imports, ImportBinding, ImportMap, DEFAULT_EXPORT};
pub use lookup::{CrossModuleLookup, ModuleScope};
pub use normalize::Normalizer;
pub use parse::{parse_program, ModuleSource};
pub use strategy::Strategy;
pub use surface::{ComponentSurface, ExtractOptions, Extraction, SurfaceExtractor, DEFAULT_COMPONENT_DEFINERS};
