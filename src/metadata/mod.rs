//! Project identity: Maven coordinates and their resolution from `pom.xml`.

mod coordinates;
mod dtd;
mod pom;

pub use coordinates::Coordinates;
pub use pom::{CoordinateResolver, PomResolver};
