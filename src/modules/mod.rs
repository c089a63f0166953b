//! Feature modules. Each has a `controller` (HTTP handlers with OpenAPI
//! annotations), a `service` (role and ownership rules plus store calls) and a
//! `router`.

pub mod auth;
pub mod courses;
pub mod enrollments;
pub mod profiles;
