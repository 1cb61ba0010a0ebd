pub mod fixture;
pub mod reports;
pub mod seeds;
pub mod tester;

pub use fixture::{FileCatalog, FileStorage, load_catalog};
pub use seeds::resolve_seeds;
pub use tester::*;
