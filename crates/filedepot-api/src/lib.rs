//! Filedepot API
//!
//! HTTP adapter for the presigned-upload protocol. Translates request and
//! response shapes to and from the upload coordinator's domain calls and
//! applies the documented error-downgrade policy (confirm/delete failures
//! become `success=false` results rather than hard errors).

pub mod api_doc;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod setup;
pub mod state;
pub mod telemetry;
