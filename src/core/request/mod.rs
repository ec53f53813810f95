//! Translation between caller requests and batch envelopes
//!
//! [`ApiRequest`] is turned into a [`SubRequest`](crate::core::batch::SubRequest)
//! before it is queued; a [`SubResponse`](crate::core::batch::SubResponse) is
//! decoded into the caller's type once its result arrives.

mod api_request;
mod params;
mod response;


pub use api_request::ApiRequest;
pub use params::{Param, param_values};
