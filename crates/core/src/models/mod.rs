//! Entity records matching the upstream Fake Store API payloads.
//!
//! Each entity comes in two shapes: the full record (with identifier) as
//! the upstream returns it, and a `New*` draft without an identifier for
//! create calls. Updates replace the full record, so they send the record
//! shape including its identifier, exactly as it was loaded.

pub mod cart;
pub mod product;
pub mod user;

pub use cart::{Cart, CartLine, NewCart};
pub use product::{Category, NewProduct, Product};
pub use user::{Address, NewUser, Name, User};
