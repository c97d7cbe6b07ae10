pub mod inflector;
pub mod logging;

pub use inflector::underscore;
