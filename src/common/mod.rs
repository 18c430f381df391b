pub use errors::*;
pub use fields::*;
pub use validation::*;

mod errors;
mod fields;
mod macros;
mod validation;
