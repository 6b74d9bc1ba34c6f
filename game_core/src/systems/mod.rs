pub mod collision;
pub mod fitness;
pub mod movement;
pub mod scoring;

pub use collision::*;
pub use fitness::*;
pub use movement::*;
pub use scoring::*;
