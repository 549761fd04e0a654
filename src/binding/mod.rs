//! Data binding: typed accessors from widgets into application data.
//!
//! - [`field`]: [`Field<V>`], a getter/setter pair tagged with its [`FieldPath`]
//! - [`schema`]: [`Schema<R>`] declares bindable fields of a record; [`Model<R>`]
//!   resolves string paths like `email` or `city_name_2` into fields
//!
//! Widgets never hold addresses into application data. They hold a [`Field`]
//! that borrows the shared record for the duration of one read or write.

pub mod field;
pub mod schema;

pub use field::{Field, FieldPath};
pub use schema::{Binder, BoundField, Model, Schema};
