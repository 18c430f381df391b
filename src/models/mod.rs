pub use alumni::*;
pub use contact::*;
pub use event::*;
pub use gallery::*;
pub use kcse_result::*;
pub use news::*;
pub use resource::*;
pub use school_stat::*;
pub use staff::*;
pub use testimonial::*;

mod alumni;
mod contact;
mod event;
mod gallery;
mod kcse_result;
mod news;
mod resource;
mod school_stat;
mod staff;
mod testimonial;
