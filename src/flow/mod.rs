pub mod definition;
pub mod editor;
pub mod step;
pub mod time;

pub use definition::*;
pub use editor::*;
pub use step::*;
pub use time::*;
