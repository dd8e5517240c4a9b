pub mod artifacts;
pub mod clock;
pub mod factory;

pub use artifacts::load_artifacts;
pub use clock::{FixedYear, SystemYear};
pub use factory::ModelFactory;
