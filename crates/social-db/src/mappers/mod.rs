//! Model to entity mappers
//!
//! `From<Model> for Entity` converts database rows to domain objects. Rows
//! holding a textual enum use `TryFrom`, so an unknown value surfaces as a
//! `DomainError` instead of a panic.

mod comment;
mod friendship;
mod group;
mod notification;
mod post;
mod user;
