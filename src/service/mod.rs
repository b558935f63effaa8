//! CrudService: model CRUD using the safe SQL builder; RequestValidator: form-driven validation.

mod crud;
mod validation;
pub use crud::{CrudService, ListPage, BULK_LIMIT};
pub use validation::RequestValidator;
