//! Sample resources implementing the [`Resource`](resource_routes::Resource) trait.
//!
//! | Resource | Base URL | Actions |
//! |----------|----------|---------|
//! | [`User`] | `/users/<id>` | `show`, `save`, `delete` |
//! | [`Product`] | `/api/products/<id>` | `show`, `save`, `reserve` |
//! | [`Order`] | `/shop/orders/<user_id>/<order_id>` | `show`, `place`, `receipt` |

pub mod error;
pub mod order;
pub mod product;
pub mod user;

pub use error::SampleError;
pub use order::*;
pub use product::*;
pub use user::*;
