pub mod answers;
pub mod crop;
pub mod outcome;

pub use answers::*;
pub use crop::*;
pub use outcome::*;
