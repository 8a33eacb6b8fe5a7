mod modular;
mod point;
mod prime;

pub use modular::{Modular, PrimeField};
pub use point::{Point, ProjectivePoint};
pub use prime::is_probably_prime;
