use super::OutputNameSet;
use crate::spec::LayerRecord;
use std::collections::{HashMap, HashSet};

/// Data-flow summary of a layer graph.
#[derive(Debug, Clone, Default)]
pub struct TerminalAnalysis {
    /// Blobs produced by some layer and read by none.
    pub terminals: OutputNameSet,
    pub produced: HashSet<String>,
    pub consumed: HashSet<String>,
    /// Layer names writing each terminal blob, in graph order. Unnamed layers are skipped.
    pub terminal_producers: HashMap<String, Vec<String>>,
}

pub struct TerminalDetector;

impl TerminalDetector {
    pub fn new() -> Self {
        Self
    }

    /// Blobs that are produced but never consumed.
    pub fn terminal_blobs(layers: &[LayerRecord]) -> OutputNameSet {
        let (produced, consumed) = Self::collect_blobs(layers);

        produced
            .iter()
            .filter(|name| !consumed.contains(*name))
            .collect()
    }

    pub fn analyze(layers: &[LayerRecord]) -> TerminalAnalysis {
        let (produced, consumed) = Self::collect_blobs(layers);

        let terminals: OutputNameSet = produced
            .iter()
            .filter(|name| !consumed.contains(*name))
            .collect();

        let mut terminal_producers: HashMap<String, Vec<String>> = HashMap::new();
        for layer in layers {
            for output in &layer.outputs {
                if !terminals.contains(output) {
                    continue;
                }
                let entry = terminal_producers.entry(output.clone()).or_default();
                if !layer.name.is_empty() && !entry.contains(&layer.name) {
                    entry.push(layer.name.clone());
                }
            }
        }

        TerminalAnalysis {
            terminals,
            produced,
            consumed,
            terminal_producers,
        }
    }

    fn collect_blobs(layers: &[LayerRecord]) -> (HashSet<String>, HashSet<String>) {
        let mut produced = HashSet::new();
        let mut consumed = HashSet::new();

        for layer in layers {
            consumed.extend(layer.inputs.iter().cloned());
            produced.extend(layer.outputs.iter().cloned());
        }

        (produced, consumed)
    }
}

impl Default for TerminalDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalAnalysis {
    pub fn has_terminals(&self) -> bool {
        !self.terminals.is_empty()
    }

    /// Blobs both produced and consumed.
    pub fn internal_blobs(&self) -> OutputNameSet {
        self.produced.intersection(&self.consumed).collect()
    }

    /// Blobs read by some layer but written by none (graph inputs, or dangling references).
    pub fn external_inputs(&self) -> OutputNameSet {
        self.consumed.difference(&self.produced).collect()
    }

    pub fn producers_of(&self, blob: &str) -> &[String] {
        self.terminal_producers
            .get(blob)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
