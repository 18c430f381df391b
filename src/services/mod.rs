pub use contact::*;
pub use controller::*;
pub use listing::*;
pub use session::*;

mod contact;
mod controller;
mod listing;
mod session;
