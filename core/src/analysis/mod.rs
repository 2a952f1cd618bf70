pub use constraint::*;
pub use probability::*;

mod constraint;
mod probability;
