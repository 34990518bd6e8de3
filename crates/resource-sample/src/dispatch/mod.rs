//! # Sample Dispatcher
//!
//! A minimal in-process stand-in for an HTTP server, built on the same
//! actor/client split as everything else in this crate:
//!
//! - [`RouteSet`] implements [`RouteBinder`](resource_routes::RouteBinder) and
//!   collects compiled endpoints from every resource.
//! - [`Dispatcher`] owns the routes and processes requests from a channel.
//! - [`DispatchClient`] sends requests and awaits replies.
//!
//! There are no sockets: a "request" is a method, a target (`/users/1?x=y`) and
//! a body.

pub mod actor;
pub mod client;
pub mod error;
pub mod pattern;
pub mod routes;

pub use actor::{Dispatch, Dispatcher, Reply, Response};
pub use client::DispatchClient;
pub use error::DispatchError;
pub use pattern::RoutePattern;
pub use routes::{BoundRoute, RouteSet};
