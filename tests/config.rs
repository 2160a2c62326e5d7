//! Configuration flowing into registries and extractors.

mod common;

use common::*;
use endpoint_mapping::mapping::extractors::NamingConventionKeyExtractor;
use endpoint_mapping::mapping::{
    CollectingEventSink, EndpointMapping, EndpointRegistry, InboundMessage, KeyExtractor,
    MappingEventKind, MappingEventSink, MethodDescriptor,
};
use endpoint_mapping::MappingConfig;
use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;

fn no_env() -> Option<HashMap<String, String>> {
    Some(HashMap::new())
}

#[test]
fn test_yaml_file_configures_mapping() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(
        file,
        "registry:\n  initial_capacity: 16\n  trace_lookups: true\n\
         naming:\n  handler_prefix: \"on\""
    )
    .unwrap();

    let config = MappingConfig::load_with_env(Some(file.path()), no_env()).unwrap();
    let extractor = NamingConventionKeyExtractor::from_config(&config.naming);
    assert_eq!(extractor.prefix(), "on");
    assert_eq!(
        extractor.key_for_method(&MethodDescriptor::new("onRefund")),
        Some("refund".to_string())
    );

    let sink = Arc::new(CollectingEventSink::new());
    let mapping = EndpointMapping::builder(extractor)
        .registry_config(config.registry.clone())
        .event_sink(sink.clone())
        .build();

    assert_eq!(mapping.scan_instance(Arc::new(PingEndpoint)).unwrap(), 0);
    let _ = mapping.endpoint_for(&InboundMessage::new().with_operation("refund"));
    assert_eq!(sink.count(MappingEventKind::LookupMiss), 1);
}

#[test]
fn test_registration_tracing_can_be_disabled_from_env() {
    let env = HashMap::from([(
        "ENDPOINT_MAPPING_REGISTRY__TRACE_REGISTRATIONS".to_string(),
        "false".to_string(),
    )]);
    let config = MappingConfig::load_with_env(None, Some(env)).unwrap();
    assert!(!config.registry.trace_registrations);

    let sink = Arc::new(CollectingEventSink::new());
    let registry: EndpointRegistry<String> = EndpointRegistry::from_config(
        &config.registry,
        Some(sink.clone() as Arc<dyn MappingEventSink>),
    );
    registry
        .register(
            "echo".to_string(),
            endpoint_mapping::HandlerDescriptor::for_instance(
                Arc::new(EchoEndpoint),
                MethodDescriptor::new("handleEcho"),
            ),
        )
        .unwrap();

    assert!(sink.events().is_empty());
}

#[test]
fn test_invalid_prefix_rejected_at_load() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    writeln!(file, r#"{{"naming": {{"handler_prefix": ""}}}}"#).unwrap();

    let error = MappingConfig::load_with_env(Some(file.path()), no_env()).unwrap_err();
    assert!(error.is_configuration_error());
    assert!(error.to_string().contains("handler_prefix"));
}
