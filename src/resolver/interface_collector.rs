use super::OutputNameSet;
use crate::spec::ModelDescription;

/// Reads the output names a model declares in its interface.
pub struct InterfaceOutputCollector;

impl InterfaceOutputCollector {
    /// Names are not checked against the layer graph.
    pub fn collect(description: &ModelDescription) -> OutputNameSet {
        description
            .outputs
            .iter()
            .map(|output| output.name.as_str())
            .collect()
    }
}
