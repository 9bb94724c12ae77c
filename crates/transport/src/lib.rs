//! An abstraction layer for the HTTP transport used by the API client.
//!
//! This crate establishes the contract between the client library and
//! whatever actually moves bytes over the network: a request carries a
//! method, an absolute URL, headers and an optional JSON body, and the
//! transport answers with a status code and a decoded JSON body.
//!
//! Types in this crate don't define any behavior, instead they are the
//! constraints that the implementors should adhere to. A non-success
//! status is a valid answer, not a transport error; only failures to get
//! an answer at all are reported through [`TransportError`].

#![deny(missing_docs)]

mod error;
mod request;
mod response;
mod transport;

pub use error::*;
pub use request::*;
pub use response::*;
pub use transport::*;
