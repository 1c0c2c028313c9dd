pub mod cli;
pub mod config;
pub mod resolver;
pub mod spec;

pub use resolver::{output_names, OutputNameSet};
pub use spec::{Model, ModelKind};
