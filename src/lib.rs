//! Per-channel live chat room domain.
//!
//! This library models a moderated chat room as a layered DDD application:
//! the ChatRoom aggregate enforces all business invariants (who may speak,
//! how messages are bounded, how bans and timeouts change room state), the
//! use-case layer drives the load-mutate-save-publish cycle, and the
//! infrastructure layer provides a document-store repository and event
//! publishing. Transport (HTTP/WebSocket) is left to the embedding
//! application.

pub mod domain;
pub mod infrastructure;
pub mod logger;
pub mod time;
pub mod usecase;
