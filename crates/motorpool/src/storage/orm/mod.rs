//! Single-table ORM storage backend.
//!
//! The same vehicle family mapped onto one table through `sqlx`: schema
//! managed by embedded migrations, rows decoded through a derived `FromRow`
//! type, and every mutation wrapped in its own transaction. `init()` fails
//! fast with `Unavailable` when migrations or the pool cannot be set up; a
//! half-initialized connection factory is never handed out.

mod repository;
mod row;

pub use repository::OrmRepository;
