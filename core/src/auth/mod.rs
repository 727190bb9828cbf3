mod descriptor;

pub use descriptor::{AuthDescriptor, TokenPattern};
