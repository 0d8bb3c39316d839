//! Role-scoped markdown context store for multi-agent systems.
//!
//! `context-roles` splits markdown documents into ordered, headed sections,
//! attaches role tags declared in headings (`[role: coordinator]`) or body
//! comments (`<!-- roles: coordinator, executor -->`), and derives filtered
//! views per role. File and directory loads go through an mtime-aware cache
//! owned by a [`store::ContextStore`].
//!
//! See <https://github.com/contextenginehq/context-engine> for the full platform.

pub mod section;
pub mod store;
pub mod view;
