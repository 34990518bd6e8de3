//! # Resource Routes Sample
//!
//! A small application built on [`resource_routes`]: three resources, an
//! in-memory store and an in-process dispatcher that serves them.
//!
//! - **[model]**: the [`User`](model::User), [`Product`](model::Product) and
//!   [`Order`](model::Order) resources and their handlers.
//! - **[dispatch]**: route matching and the dispatcher actor/client.
//! - **[lifecycle]**: [`ResourceSystem`](lifecycle::ResourceSystem), which wires it all.
//! - **[store]**: the shared in-memory maps.

pub mod dispatch;
pub mod lifecycle;
pub mod model;
pub mod store;
