pub mod category;
pub mod member;
pub mod survey;

pub use category::*;
pub use member::*;
pub use survey::*;
