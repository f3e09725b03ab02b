//! The library code for the `dripfeed` blog generator. Each run publishes at
//! most one new post, and the architecture follows that run step by step:
//!
//! 1. Reading topics from the topics CSV ([`crate::topic`])
//! 2. Picking the first topic that has no post yet ([`crate::topic::next_topic`])
//! 3. Rendering its page from the fixed post template, with section prose
//!    taken from the curated copy library ([`crate::post`], [`crate::copy`])
//! 4. Recording the new URL in `sitemap.xml` ([`crate::sitemap`])
//! 5. Rebuilding the blog index from the post files on disk
//!    ([`crate::index`])
//!
//! [`crate::build::publish`] runs the whole sequence. The existence of
//! `<slug>.html` is the only record of what has been published, so the
//! filesystem is the only state carried between runs.
//!
//! Separately, [`crate::analytics`] injects a Google Analytics snippet into
//! the site's pages.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod analytics;
pub mod build;
pub mod config;
pub mod copy;
pub mod index;
pub mod post;
pub mod sitemap;
pub mod template;
pub mod topic;
mod util;
mod value;
