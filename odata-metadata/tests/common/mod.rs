//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::cell::Cell;

use odata_metadata::config::ServiceConfig;
use odata_metadata::edm::EdmModel;
use odata_metadata::edm::EntityType;
use odata_metadata::edm::InMemoryModel;
use odata_metadata::edm::NavigationProperty;
use odata_metadata::edm::NavigationSource;
use odata_metadata::edm::OperationDefinition;
use odata_metadata::edm::OperationParameter;
use odata_metadata::edm::PropertyPath;
use odata_metadata::edm::StructuralProperty;
use odata_metadata::uri::UrlConvention;
use url::Url;

/// Routes `log` output to the test harness.
pub fn init_logging() {
    let _ = simplelog::TestLogger::init(simplelog::LevelFilter::Trace, simplelog::Config::default());
}

pub const SERVICE_ROOT: &str = "http://host/service/";

pub fn config() -> ServiceConfig {
    ServiceConfig::new(SERVICE_ROOT).unwrap()
}

pub fn key_as_segment_config() -> ServiceConfig {
    config().with_url_convention(UrlConvention::KeyAsSegment)
}

pub fn url(s: &str) -> Url {
    Url::parse(s).unwrap()
}

/// A small trip-planning model.
///
/// - `People` (`NS.Person`, derived `NS.Employee`) with contained `Trips`
///   and, on employees only, contained `Tasks`
/// - `Documents` (`NS.Document`, a media type)
/// - `Orders` (`NS.Order`, composite key)
/// - `Logs` (`NS.Log`, no key)
/// - singleton `Company`
pub fn model() -> InMemoryModel {
    InMemoryModel::new()
        .with_entity_type(
            EntityType::new("NS.Person")
                .with_key(&["Id"])
                .with_property(StructuralProperty::new("Id", "Edm.Int32"))
                .with_property(StructuralProperty::new("Name", "Edm.String"))
                .with_property(StructuralProperty::stream("Photo"))
                .with_navigation(NavigationProperty::collection("Trips", "NS.Trip").contained())
                .with_navigation(NavigationProperty::single("BestFriend", "NS.Person")),
        )
        .with_entity_type(
            EntityType::new("NS.Employee")
                .derived_from("NS.Person")
                .with_navigation(NavigationProperty::collection("Tasks", "NS.Task").contained()),
        )
        .with_entity_type(
            EntityType::new("NS.Trip")
                .with_key(&["TripId"])
                .with_property(StructuralProperty::new("TripId", "Edm.Int32"))
                .with_property(StructuralProperty::new("Budget", "Edm.Double").concurrency_token()),
        )
        .with_entity_type(
            EntityType::new("NS.Task")
                .with_key(&["Id"])
                .with_property(StructuralProperty::new("Id", "Edm.Int32")),
        )
        .with_entity_type(
            EntityType::new("NS.Document")
                .with_key(&["Id"])
                .with_property(StructuralProperty::new("Id", "Edm.Int32"))
                .with_stream(),
        )
        .with_entity_type(
            EntityType::new("NS.Order")
                .with_key(&["A", "B"])
                .with_property(StructuralProperty::new("A", "Edm.Int32"))
                .with_property(StructuralProperty::new("B", "Edm.String")),
        )
        .with_entity_type(EntityType::new("NS.Log").with_property(StructuralProperty::new("Text", "Edm.String")))
        .with_entity_type(
            EntityType::new("NS.Company")
                .with_key(&["Id"])
                .with_property(StructuralProperty::new("Id", "Edm.Int32")),
        )
        .with_entity_set("People", "NS.Person")
        .with_entity_set("Documents", "NS.Document")
        .with_entity_set("Orders", "NS.Order")
        .with_entity_set("Logs", "NS.Log")
        .with_singleton("Company", "NS.Company")
        .with_contained("Trips", "NS.Trip")
        .with_contained("Tasks", "NS.Task")
        .with_operation(
            OperationDefinition::action("NS", "ShareTrip")
                .bound_to(OperationParameter::new("person", "NS.Person")),
        )
        .with_operation(
            OperationDefinition::action("NS", "Promote")
                .bound_to(OperationParameter::new("employee", "NS.Employee")),
        )
        .with_operation(
            OperationDefinition::function("NS", "GetFavoriteAirline")
                .bound_to(OperationParameter::new("person", "NS.Person")),
        )
}

/// Wraps a model and counts lookups.
pub struct CountingModel {
    inner: InMemoryModel,
    lookups: Cell<usize>,
}

impl CountingModel {
    pub fn new(inner: InMemoryModel) -> Self {
        Self {
            inner,
            lookups: Cell::new(0),
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.get()
    }

    fn count(&self) {
        self.lookups.set(self.lookups.get() + 1);
    }
}

impl EdmModel for CountingModel {
    fn find_entity_type(&self, name: &str) -> Option<&EntityType> {
        self.count();
        self.inner.find_entity_type(name)
    }

    fn find_navigation_source(&self, name: &str) -> Option<&NavigationSource> {
        self.count();
        self.inner.find_navigation_source(name)
    }

    fn optimistic_concurrency_paths(&self, navigation_source: &str) -> Option<&[PropertyPath]> {
        self.count();
        self.inner.optimistic_concurrency_paths(navigation_source)
    }

    fn operations(&self) -> &[OperationDefinition] {
        self.count();
        self.inner.operations()
    }
}
