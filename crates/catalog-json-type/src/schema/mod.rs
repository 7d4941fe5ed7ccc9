//! Record descriptor AST: type references, fields, records, discriminators.

pub mod schema;
pub mod validate;

pub use schema::*;
pub use validate::validate_record;
