//! # sinopia_canon
//!
//! Canon - The coverage matcher for Sinopia.
//!
//! ## Name Origin
//!
//! **Canon** (/ˈkænən/) is the set of proportions a figure is measured
//! against. `sinopia_canon` measures a test file against the component
//! surface sketched by `sinopia_croquis` and reports which declared members
//! the tests actually touch.
//!
//! ## Evidence
//!
//! Matching is structural over the parsed test file, never textual:
//!
//! | category       | evidence                                                        |
//! |----------------|-----------------------------------------------------------------|
//! | inputs         | `props` / `propsData` in mount options, `setProps` / `rerender` |
//! | events         | `emitted('x')`, `emitted().x`, `toHaveProperty('x')`, `onX`     |
//! | slots          | `slots` / `scopedSlots` in mount options                        |
//! | exposedMembers | `wrapper.vm.x`, `wrapper.vm['x']`                               |
//!
//! Coverage is a heuristic: evidence means the test mentions a member, not
//! that it asserts anything about it.

mod evidence;
mod options;
mod report;

pub use evidence::Evidence;
pub use options::{MatchOptions, DEFAULT_MOUNT_FUNCTIONS};
pub use report::{match_coverage, CoverageEntry, CoverageMatcher, CoverageReport};
