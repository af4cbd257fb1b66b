//! Multi-host request routing.
//!
//! Every inbound request runs through one ordered pipeline:
//!
//! 1. [`dispatch`] recognises requests owned by the short-link handler and
//!    yields a [`DispatchHint`].
//! 2. [`RoutingPolicy::evaluate`] maps the request, the hint and the running
//!    [`crate::config::AppEnv`] to exactly one [`RoutingDecision`].
//!
//! Both stages are pure; the HTTP glue lives in
//! [`crate::api::middleware::routing`].

pub mod decision;
pub mod dispatch;
pub mod paths;
pub mod policy;
pub mod request;

pub use decision::{ErrorPage, RedirectStatus, RoutingDecision};
pub use dispatch::{DispatchHint, dispatch, short_link_code};
pub use policy::RoutingPolicy;
pub use request::RequestTarget;
