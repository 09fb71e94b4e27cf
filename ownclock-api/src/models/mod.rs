mod clock;
mod system;

pub use clock::*;
pub use system::*;
