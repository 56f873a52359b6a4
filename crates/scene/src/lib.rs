pub mod highlight;
pub mod markers;
pub mod picking;
pub mod prefabs;

pub use highlight::*;
pub use markers::*;
pub use picking::*;
