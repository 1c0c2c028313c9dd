use super::{ClassifierOutputResolver, InterfaceOutputCollector, OutputNameSet};
use crate::spec::{Model, ModelKind};

/// Output blob names of `model`, resolved by its variant.
pub fn output_names(model: &Model) -> OutputNameSet {
    match &model.network {
        ModelKind::NeuralNetwork(_) | ModelKind::NeuralNetworkRegressor(_) => {
            InterfaceOutputCollector::collect(&model.description)
        }
        ModelKind::NeuralNetworkClassifier(classifier) => {
            ClassifierOutputResolver::resolve(&model.description, classifier)
        }
    }
}

impl Model {
    pub fn output_names(&self) -> OutputNameSet {
        output_names(self)
    }
}
