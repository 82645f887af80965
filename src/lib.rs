//! Client-side shopping cart state manager.
//!
//! The cart is a tokio actor owning the ordered line-item sequence. UI
//! consumers hold a [`clients::CartClient`], watch cart snapshots through
//! [`app_system::CartSystem::snapshots`], and render failure messages from
//! [`app_system::CartSystem::notifications`].
//!
//! Every mutation is validated against the remote stock service and
//! persisted to the key-value store before it becomes visible; a failure
//! anywhere along the way leaves the cart exactly as it was and raises a
//! human-readable notification instead.

pub mod actors;
pub mod app_system;
pub mod catalog;
pub mod clients;
pub mod config;
pub mod domain;
pub mod error;
pub mod messages;
pub mod notify;
pub mod storage;

#[cfg(test)]
mod mock_framework;
