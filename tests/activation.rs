use callbridge::prelude::*;
use callbridge::resolver::SourceKind;
use std::sync::Mutex;

#[derive(Default)]
struct Greeter {
    seen: Mutex<Vec<String>>,
}

impl Application for Greeter {
    fn run(&self, _session_id: &str, args: &str) -> anyhow::Result<()> {
        self.seen.lock().unwrap().push(args.to_string());
        Ok(())
    }

    fn capabilities(self: Arc<Self>) -> CapabilitySet {
        CapabilitySet::new().on_hangup(|_, cause| {
            if cause == "NORMAL_CLEARING" {
                Status::Stop
            } else {
                Status::Continue
            }
        })
    }
}

fn isolated(catalog: Catalog) -> Bootstrap {
    Bootstrap::new(Arc::new(catalog), Arc::new(HandlerRegistry::new()))
}

#[test]
fn test_archive_activation_string() {
    let spec = callbridge::EntryPointResolver::resolve("a.jar b.C.D rest of args").unwrap();
    assert_eq!(spec.source, SourceKind::Archive("a.jar".to_string()));
    assert_eq!(spec.qualified_name, "b.C.D");
    assert_eq!(spec.residual_args, "rest of args");
}

#[test]
fn test_classpath_activation_string() {
    let spec = callbridge::EntryPointResolver::resolve("b.C.D rest").unwrap();
    assert_eq!(spec.source, SourceKind::Classpath);
    assert_eq!(spec.qualified_name, "b.C.D");
    assert_eq!(spec.residual_args, "rest");

    let single = callbridge::EntryPointResolver::resolve("b.C.D").unwrap();
    assert_eq!(single.residual_args, "");
}

#[test]
fn test_resolution_failures() {
    assert!(matches!(
        callbridge::EntryPointResolver::resolve(""),
        Err(BridgeError::MalformedArguments { .. })
    ));
    assert!(matches!(
        callbridge::EntryPointResolver::resolve("x.jar"),
        Err(BridgeError::MissingQualifiedName { .. })
    ));
}

#[test]
fn test_activation_routes_hangup_cause() {
    let catalog = Catalog::new();
    catalog
        .archive("apps.jar")
        .factory(Factory::application::<Greeter>("org.example.Greeter"));
    let bootstrap = isolated(catalog);

    let activation = bootstrap
        .activate("S-1", "apps.jar org.example.Greeter lang=en")
        .unwrap();
    assert_eq!(activation.registered, vec![Tag::Hangup]);
    assert_eq!(activation.spec.residual_args, "lang=en");

    let registry = bootstrap.registry();
    assert_eq!(registry.dispatch_hangup("S-1", "NORMAL_CLEARING"), Status::Stop);
    assert_eq!(registry.dispatch_hangup("S-1", "USER_BUSY"), Status::Continue);
}

#[test]
fn test_unregistered_dispatch_is_neutral() {
    let registry = HandlerRegistry::new();
    for tag in [Tag::Init, Tag::Park, Tag::Reporting, Tag::Destroy] {
        assert_eq!(registry.dispatch("nobody", tag), Status::Continue);
    }
    assert_eq!(registry.dispatch_hangup("nobody", "NORMAL_CLEARING"), Status::Continue);
}

#[test]
fn test_host_adapter_end_to_end() {
    let catalog = Catalog::new();
    catalog
        .classpath()
        .factory(Factory::application::<Greeter>("org.example.Greeter"));
    let host = HostAdapter::new(isolated(catalog), StatusCodes::default());

    assert_eq!(host.activate("S-2", "org.example.Greeter"), 0);
    assert_eq!(host.on_hangup("S-2", "NORMAL_CLEARING"), 1);
    assert_eq!(host.on_state("S-2", Tag::Destroy), 0);
    assert!(!host.registry().contains("S-2", Tag::Hangup));

    assert_eq!(host.activate("S-3", "missing.jar org.example.Nope"), 9);
}

#[test]
fn test_event_header_overwrite() {
    let record = EventBuilder::new()
        .add_header("k", "v1")
        .add_header("k", "v2")
        .build();
    assert_eq!(record.header("k"), Some("v2"));
    assert_eq!(record.len(), 1);
}
