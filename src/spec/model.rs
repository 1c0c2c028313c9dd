use serde::{Deserialize, Serialize};

/// A named output declared in the model's interface.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OutputDescriptor {
    pub name: String,
}

impl OutputDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// The externally visible interface of a model.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModelDescription {
    #[serde(default)]
    pub outputs: Vec<OutputDescriptor>,
}

impl ModelDescription {
    pub fn with_outputs<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            outputs: names.into_iter().map(OutputDescriptor::new).collect(),
        }
    }
}

/// One layer of the network graph, seen only through the blobs it reads and writes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LayerRecord {
    /// Layer name, used for diagnostics only. Empty when the model spec omits it.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<String>,
    #[serde(default)]
    pub outputs: Vec<String>,
}

impl LayerRecord {
    pub fn new(inputs: &[&str], outputs: &[&str]) -> Self {
        Self {
            name: String::new(),
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            outputs: outputs.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NeuralNetwork {
    #[serde(default)]
    pub layers: Vec<LayerRecord>,
}

/// Classifier-specific metadata. Empty strings mean "unset".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifierDefinition {
    #[serde(default)]
    pub predicted_feature_name: String,
    #[serde(default)]
    pub predicted_probabilities_name: String,
    #[serde(default)]
    pub label_probability_layer_name: String,
    #[serde(default)]
    pub layers: Vec<LayerRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ModelKind {
    NeuralNetwork(NeuralNetwork),
    NeuralNetworkRegressor(NeuralNetwork),
    NeuralNetworkClassifier(ClassifierDefinition),
}

impl ModelKind {
    pub fn name(&self) -> &'static str {
        match self {
            ModelKind::NeuralNetwork(_) => "neuralNetwork",
            ModelKind::NeuralNetworkRegressor(_) => "neuralNetworkRegressor",
            ModelKind::NeuralNetworkClassifier(_) => "neuralNetworkClassifier",
        }
    }

    pub fn layers(&self) -> &[LayerRecord] {
        match self {
            ModelKind::NeuralNetwork(nn) | ModelKind::NeuralNetworkRegressor(nn) => &nn.layers,
            ModelKind::NeuralNetworkClassifier(classifier) => &classifier.layers,
        }
    }

    pub fn as_classifier(&self) -> Option<&ClassifierDefinition> {
        match self {
            ModelKind::NeuralNetworkClassifier(classifier) => Some(classifier),
            _ => None,
        }
    }
}

/// A loaded model specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[serde(default)]
    pub specification_version: u32,
    #[serde(default)]
    pub description: ModelDescription,
    pub network: ModelKind,
}

impl Model {
    pub fn new(description: ModelDescription, network: ModelKind) -> Self {
        Self {
            specification_version: 1,
            description,
            network,
        }
    }
}
