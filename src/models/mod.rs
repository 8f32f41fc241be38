pub mod job;
pub mod outcome;
pub mod request;
pub mod style;

pub use job::*;
pub use outcome::*;
pub use request::*;
pub use style::*;
