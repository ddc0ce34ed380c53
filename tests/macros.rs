use callbridge::prelude::*;
use callbridge::resolver::SourceKind;

#[derive(Unit, Default)]
#[unit(name = "org.example.Voicemail")]
pub struct Voicemail;

impl Application for Voicemail {
    fn run(&self, _session_id: &str, _args: &str) -> anyhow::Result<()> {
        Ok(())
    }

    fn capabilities(self: Arc<Self>) -> CapabilitySet {
        CapabilitySet::new().on_execute(|_| Status::Continue)
    }
}

#[derive(Unit, Default)]
pub struct Conference;

impl Application for Conference {
    fn run(&self, _session_id: &str, _args: &str) -> anyhow::Result<()> {
        Ok(())
    }
}

#[derive(Unit, Default)]
#[unit(name = "org.example.Cdr")]
pub struct Cdr;

impl LifecycleHandler for Cdr {
    fn capabilities(self: Arc<Self>) -> CapabilitySet {
        CapabilitySet::new().on_reporting(|_| Status::Stop)
    }
}

#[derive(Unit, Default)]
#[unit(name = "org.example.Ivr")]
pub struct Ivr;

impl Application for Ivr {
    fn run(&self, _session_id: &str, args: &str) -> anyhow::Result<()> {
        anyhow::ensure!(!args.is_empty(), "menu name required");
        Ok(())
    }
}

#[catalog(handlers = [Cdr])]
pub struct CoreCatalog;

#[catalog(
    imports = [CoreCatalog],
    applications = [Voicemail],
    shared = [Conference],
)]
pub struct AppCatalog;

#[catalog(archive = "ivr.jar", applications = [Ivr])]
pub struct IvrCatalog;

#[test]
fn test_unit_names() {
    assert_eq!(Voicemail::QUALIFIED_NAME, "org.example.Voicemail");
    assert_eq!(Conference::QUALIFIED_NAME, "Conference");
}

#[test]
fn test_catalog_registers_imports_and_units() {
    let catalog = AppCatalog::create_catalog().unwrap();

    assert_eq!(
        catalog.names(&SourceKind::Classpath),
        vec!["Conference", "org.example.Cdr", "org.example.Voicemail"]
    );

    let bootstrap = Bootstrap::new(Arc::new(catalog), Arc::new(HandlerRegistry::new()));
    let activation = bootstrap.activate("S", "org.example.Voicemail").unwrap();
    assert_eq!(activation.registered, vec![Tag::Execute]);

    bootstrap.install_defaults("org.example.Cdr").unwrap();
    assert_eq!(bootstrap.registry().dispatch("S", Tag::Reporting), Status::Stop);
}

#[test]
fn test_archive_scoped_catalog() {
    let catalog = Catalog::new();
    IvrCatalog::register(&catalog).unwrap();
    let bootstrap = Bootstrap::new(Arc::new(catalog), Arc::new(HandlerRegistry::new()));

    assert!(bootstrap.activate("S", "ivr.jar org.example.Ivr main").is_ok());
    assert!(matches!(
        bootstrap.activate("S", "org.example.Ivr main"),
        Err(BridgeError::CodeNotFound { .. })
    ));
    assert!(matches!(
        bootstrap.activate("S", "ivr.jar org.example.Ivr"),
        Err(BridgeError::ApplicationError { .. })
    ));
}
