pub mod scalar;
pub mod sphere;
pub mod vec;

pub use scalar::*;
pub use sphere::*;
pub use vec::*;
