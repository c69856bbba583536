pub mod alert;
pub mod bar;
pub mod signal;

pub use alert::*;
pub use bar::*;
pub use signal::*;
