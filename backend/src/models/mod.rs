pub mod forecast;
pub mod records;
pub mod time;

pub use forecast::*;
pub use records::*;
pub use time::*;
