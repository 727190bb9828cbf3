mod file;
mod stdout;

pub use file::FileHandoff;
pub use stdout::StdoutHandoff;
