use super::{InterfaceOutputCollector, OutputNameSet, TerminalDetector};
use crate::spec::{ClassifierDefinition, ModelDescription};
use log::debug;
use serde::Serialize;

/// Where the classifier's probability blob came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ProbabilitySource {
    /// Named by `labelProbabilityLayerName`.
    Explicit(String),
    /// Older specs without the field: every terminal blob of the layer graph.
    LegacyTerminals(OutputNameSet),
}

#[derive(Debug, Clone)]
pub struct ClassifierResolution {
    pub outputs: OutputNameSet,
    /// Interface outputs dropped because they name classifier metadata.
    pub excluded: Vec<String>,
    pub probability_source: ProbabilitySource,
}

/// Resolves the layer blobs a classifier exports. The predicted label and
/// probability dictionary are produced outside the network, so they are not
/// layer outputs even though the interface declares them.
pub struct ClassifierOutputResolver;

impl ClassifierOutputResolver {
    pub fn resolve(
        description: &ModelDescription,
        classifier: &ClassifierDefinition,
    ) -> OutputNameSet {
        Self::explain(description, classifier).outputs
    }

    pub fn explain(
        description: &ModelDescription,
        classifier: &ClassifierDefinition,
    ) -> ClassifierResolution {
        let mut outputs = InterfaceOutputCollector::collect(description);

        // Empty metadata names are compared literally.
        let mut excluded = Vec::new();
        for metadata_name in [
            &classifier.predicted_feature_name,
            &classifier.predicted_probabilities_name,
        ] {
            if outputs.remove(metadata_name) {
                excluded.push(metadata_name.clone());
            }
        }

        // Neither branch is checked against the layer graph, and the legacy
        // set is not filtered against the excluded names.
        let probability_source = if !classifier.label_probability_layer_name.is_empty() {
            outputs.insert(classifier.label_probability_layer_name.as_str());
            ProbabilitySource::Explicit(classifier.label_probability_layer_name.clone())
        } else {
            let terminals = TerminalDetector::terminal_blobs(&classifier.layers);
            debug!(
                "No labelProbabilityLayerName set, using {} terminal blob(s) from {} layer(s)",
                terminals.len(),
                classifier.layers.len()
            );
            outputs.extend(terminals.iter());
            ProbabilitySource::LegacyTerminals(terminals)
        };

        ClassifierResolution {
            outputs,
            excluded,
            probability_source,
        }
    }
}

impl ClassifierResolution {
    pub fn used_legacy_fallback(&self) -> bool {
        matches!(self.probability_source, ProbabilitySource::LegacyTerminals(_))
    }
}
