//! Pipeline stages for HTML-to-Markdown generation.
//!
//! Each submodule implements exactly one step. The conversion stages
//! ([`rules`], [`postprocess`]) are pure string functions; only [`discover`]
//! and [`aggregate`] touch the filesystem.
//!
//! ## Data Flow
//!
//! ```text
//! discover ──▶ rules ──▶ postprocess ──▶ (write .md) ──▶ aggregate
//! (walkdir)   (regex)   (entities, ws)                  (llms.txt)
//! ```
//!
//! 1. [`discover`]    — walk the build output for `.html` files
//! 2. [`rules`]       — ordered regex rewrites from markup to Markdown
//! 3. [`postprocess`] — decode entities, collapse blank lines, trim
//! 4. [`aggregate`]   — concatenate every generated file into one

pub mod aggregate;
pub mod discover;
pub mod postprocess;
pub mod rules;
