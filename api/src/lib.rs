// Module layout (Clean Architecture style)
// - bootstrap: configuration and startup wiring
// - infrastructure: Postgres repositories and upload storage
// - presentation: HTTP handlers, identity extraction and routing
// - application: ownership, reference checks and use cases
// - domain: farmers, policies, claims and insurance applications

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
