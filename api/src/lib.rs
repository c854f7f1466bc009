// Module layout (Clean Architecture style)
// - bootstrap: configuration and the composition root
// - infrastructure: Postgres pool, migrations and sqlx repositories
// - presentation: HTTP handlers, middleware and routing
// - application: repository ports, password hashing and auth use cases
// - domain: core models

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
