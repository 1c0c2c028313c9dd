pub mod error;
pub mod loader;
pub mod model;

pub use error::LoadError;
pub use loader::{discover_specs, load_model, parse_model, SpecFormat};
pub use model::{
    ClassifierDefinition, LayerRecord, Model, ModelDescription, ModelKind, NeuralNetwork,
    OutputDescriptor,
};
