use nnoutputs::resolver::{
    output_names, ClassifierOutputResolver, InterfaceOutputCollector, OutputNameSet,
    ProbabilitySource, TerminalDetector,
};
use nnoutputs::spec::{
    ClassifierDefinition, LayerRecord, Model, ModelDescription, ModelKind, NeuralNetwork,
};

fn set(names: &[&str]) -> OutputNameSet {
    names.iter().copied().collect()
}

fn softmax_layers() -> Vec<LayerRecord> {
    vec![
        LayerRecord::new(&[], &["raw"]),
        LayerRecord::new(&["raw"], &["softmaxOut"]),
    ]
}

fn scenario_classifier(label_probability_layer_name: &str) -> ClassifierDefinition {
    ClassifierDefinition {
        predicted_feature_name: "classLabel".to_string(),
        predicted_probabilities_name: "probOut".to_string(),
        label_probability_layer_name: label_probability_layer_name.to_string(),
        layers: softmax_layers(),
    }
}

fn scenario_description() -> ModelDescription {
    ModelDescription::with_outputs(["classLabel", "probOut", "extraBlob"])
}

#[test]
fn test_generic_resolution_is_declared_outputs() {
    let description = ModelDescription::with_outputs(["a", "b", "c"]);

    // The layer graph must have no influence.
    let graphs = vec![
        Vec::new(),
        vec![LayerRecord::new(&["a"], &["dangling"])],
        softmax_layers(),
    ];

    for layers in graphs {
        let model = Model::new(
            description.clone(),
            ModelKind::NeuralNetwork(NeuralNetwork { layers }),
        );
        assert_eq!(output_names(&model), set(&["a", "b", "c"]));
    }
}

#[test]
fn test_generic_resolution_of_empty_description() {
    let model = Model::new(
        ModelDescription::default(),
        ModelKind::NeuralNetworkRegressor(NeuralNetwork {
            layers: softmax_layers(),
        }),
    );

    assert!(output_names(&model).is_empty());
}

#[test]
fn test_classifier_never_keeps_metadata_names_from_interface() {
    let description = ModelDescription::with_outputs(["label", "probs", "features", "logits"]);
    let classifier = ClassifierDefinition {
        predicted_feature_name: "label".to_string(),
        predicted_probabilities_name: "probs".to_string(),
        label_probability_layer_name: "logits".to_string(),
        layers: vec![LayerRecord::new(&["image"], &["features", "logits"])],
    };

    let outputs = ClassifierOutputResolver::resolve(&description, &classifier);
    assert!(!outputs.contains("label"));
    assert!(!outputs.contains("probs"));
    assert_eq!(outputs, set(&["features", "logits"]));
}

#[test]
fn test_metadata_match_is_case_sensitive() {
    let description = ModelDescription::with_outputs(["ClassLabel", "classLabel"]);
    let classifier = ClassifierDefinition {
        predicted_feature_name: "classLabel".to_string(),
        label_probability_layer_name: "probs".to_string(),
        ..Default::default()
    };

    let outputs = ClassifierOutputResolver::resolve(&description, &classifier);
    assert_eq!(outputs, set(&["ClassLabel", "probs"]));
}

#[test]
fn test_explicit_probability_layer_always_present() {
    for layers in [Vec::new(), softmax_layers()] {
        let classifier = ClassifierDefinition {
            label_probability_layer_name: "probs".to_string(),
            layers,
            ..Default::default()
        };

        let outputs = ClassifierOutputResolver::resolve(&ModelDescription::default(), &classifier);
        assert!(outputs.contains("probs"));
    }
}

#[test]
fn test_legacy_fallback_on_chain_contributes_last_blob() {
    let classifier = ClassifierDefinition {
        layers: vec![
            LayerRecord::new(&[], &["x"]).named("A"),
            LayerRecord::new(&["x"], &["y"]).named("B"),
            LayerRecord::new(&["y"], &["z"]).named("C"),
        ],
        ..Default::default()
    };

    let resolution = ClassifierOutputResolver::explain(&ModelDescription::default(), &classifier);
    assert_eq!(
        resolution.probability_source,
        ProbabilitySource::LegacyTerminals(set(&["z"]))
    );
    assert_eq!(resolution.outputs, set(&["z"]));
}

#[test]
fn test_legacy_fallback_on_empty_graph_contributes_nothing() {
    let description = ModelDescription::with_outputs(["extra"]);
    let classifier = ClassifierDefinition::default();

    let resolution = ClassifierOutputResolver::explain(&description, &classifier);
    assert_eq!(
        resolution.probability_source,
        ProbabilitySource::LegacyTerminals(OutputNameSet::new())
    );
    assert_eq!(resolution.outputs, set(&["extra"]));
}

#[test]
fn test_resolution_is_idempotent() {
    let model = Model::new(
        scenario_description(),
        ModelKind::NeuralNetworkClassifier(scenario_classifier("")),
    );

    let first = output_names(&model);
    let second = output_names(&model);
    assert_eq!(first, second);

    // Sequence views may differ in order but agree as sets.
    let first_vec: OutputNameSet = first.into_vec().into_iter().collect();
    let second_vec: OutputNameSet = second.into_vec().into_iter().collect();
    assert_eq!(first_vec, second_vec);
}

#[test]
fn test_scenario_legacy_path() {
    let outputs = ClassifierOutputResolver::resolve(&scenario_description(), &scenario_classifier(""));
    assert_eq!(outputs, set(&["extraBlob", "softmaxOut"]));
}

#[test]
fn test_scenario_explicit_path_agrees_with_legacy() {
    let explicit =
        ClassifierOutputResolver::resolve(&scenario_description(), &scenario_classifier("softmaxOut"));
    let legacy = ClassifierOutputResolver::resolve(&scenario_description(), &scenario_classifier(""));

    assert_eq!(explicit, set(&["extraBlob", "softmaxOut"]));
    assert_eq!(explicit, legacy);
}

#[test]
fn test_scenario_probability_layer_not_in_graph() {
    let outputs =
        ClassifierOutputResolver::resolve(&scenario_description(), &scenario_classifier("customProb"));

    assert!(outputs.contains("customProb"));
    assert!(!outputs.contains("softmaxOut"));
    assert_eq!(outputs, set(&["extraBlob", "customProb"]));
}

#[test]
fn test_dispatch_matches_direct_calls() {
    let description = scenario_description();
    let classifier = scenario_classifier("");

    let classifier_model = Model::new(
        description.clone(),
        ModelKind::NeuralNetworkClassifier(classifier.clone()),
    );
    assert_eq!(
        classifier_model.output_names(),
        ClassifierOutputResolver::resolve(&description, &classifier)
    );

    let plain_model = Model::new(
        description.clone(),
        ModelKind::NeuralNetwork(NeuralNetwork {
            layers: classifier.layers.clone(),
        }),
    );
    assert_eq!(
        plain_model.output_names(),
        InterfaceOutputCollector::collect(&description)
    );
}

#[test]
fn test_terminal_detector_ignores_multiply_produced_internal_blob() {
    let layers = vec![
        LayerRecord::new(&["in"], &["h"]),
        LayerRecord::new(&["in"], &["h"]),
        LayerRecord::new(&["h"], &["out"]),
        LayerRecord::new(&["h"], &["aux"]),
    ];

    assert_eq!(TerminalDetector::terminal_blobs(&layers), set(&["aux", "out"]));
}
