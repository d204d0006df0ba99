//! Backend of the application.
//! Contains the request handlers, the API models and the router.

pub mod handlers;
mod models;
pub mod router;
