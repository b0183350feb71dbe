//! Middleware and request-auth collaborators

pub mod auth;
