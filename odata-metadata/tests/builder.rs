//! Conventional metadata builder behaviour.

mod common;

use common::*;
use odata_metadata::MetadataError;
use odata_metadata::edm::NavigationSourceKind;
use odata_metadata::edm::SelectedProperties;
use odata_metadata::metadata::MetadataContext;
use odata_metadata::metadata::ResourceMetadataBuilder;
use odata_metadata::metadata::ResourceScope;
use odata_metadata::metadata::ResourceSerializationInfo;
use odata_metadata::model::Operation;
use odata_metadata::model::Property;
use odata_metadata::model::Resource;
use odata_metadata::model::Value;
use odata_metadata::model::WireValue;
use odata_metadata::model::types::StreamReference;

fn people() -> ResourceScope {
    ResourceScope::for_navigation_source("People").from_collection()
}

fn person(id: i32) -> Resource {
    Resource::new("NS.Person")
        .with_property(Property::new("Id", id))
        .with_property(Property::new("Name", "Ann"))
}

fn employee(id: i32) -> Resource {
    Resource::new("NS.Employee").with_property(Property::new("Id", id))
}

// =============================================================================
// Ids and links
// =============================================================================

#[test]
fn test_entity_set_member_links() {
    let model = model();
    let service = MetadataContext::new(config()).with_model(&model);
    let person = person(1);
    let builder = service.create_builder(&person, &people(), None).unwrap();

    let expected = url("http://host/service/People(1)");
    assert_eq!(builder.id().unwrap(), Some(expected.clone()));
    assert_eq!(builder.edit_link().unwrap(), Some(expected.clone()));
    assert_eq!(builder.read_link().unwrap(), Some(expected.clone()));
    assert_eq!(builder.id_for_serialization().unwrap(), WireValue::Value(expected));
}

#[test]
fn test_derived_type_edit_link_has_type_segment() {
    let model = model();
    let service = MetadataContext::new(config()).with_model(&model);
    let employee = employee(1);
    let builder = service.create_builder(&employee, &people(), None).unwrap();

    assert_eq!(builder.id().unwrap(), Some(url("http://host/service/People(1)")));
    assert_eq!(
        builder.edit_link().unwrap(),
        Some(url("http://host/service/People(1)/NS.Employee"))
    );
}

#[test]
fn test_singleton_id() {
    let model = model();
    let service = MetadataContext::new(config()).with_model(&model);
    let company = Resource::new("NS.Company").with_property(Property::new("Id", 1i32));
    let builder = service
        .create_builder(&company, &ResourceScope::for_navigation_source("Company"), None)
        .unwrap();

    assert_eq!(builder.id().unwrap(), Some(url("http://host/service/Company")));
}

#[test]
fn test_key_as_segment_convention() {
    let model = model();
    let service = MetadataContext::new(key_as_segment_config()).with_model(&model);
    let person = person(1);
    let builder = service.create_builder(&person, &people(), None).unwrap();

    assert_eq!(builder.id().unwrap(), Some(url("http://host/service/People/1")));
}

#[test]
fn test_wire_values_win() {
    let model = model();
    let service = MetadataContext::new(config()).with_model(&model);

    // NS.Log has no key, so computing anything would fail.
    let log = Resource::new("NS.Log").with_edit_link(url("http://x/E(1)"));
    let builder = service
        .create_builder(&log, &ResourceScope::for_navigation_source("Logs"), None)
        .unwrap();

    assert_eq!(builder.edit_link().unwrap(), Some(url("http://x/E(1)")));
    assert_eq!(builder.read_link().unwrap(), Some(url("http://x/E(1)")));
    assert_eq!(
        builder.id().unwrap_err(),
        MetadataError::no_key_properties("NS.Log")
    );

    let explicit = person(1)
        .with_id(url("http://x/People('a')"))
        .with_read_link(url("http://x/read"))
        .with_etag("W/\"wire\"".to_string());
    let builder = service.create_builder(&explicit, &people(), None).unwrap();
    assert_eq!(builder.id().unwrap(), Some(url("http://x/People('a')")));
    assert_eq!(builder.read_link().unwrap(), Some(url("http://x/read")));
    assert_eq!(builder.etag().unwrap().as_deref(), Some("W/\"wire\""));
    // A resource with only a read link is read-only.
    assert_eq!(builder.edit_link().unwrap(), None);
}

#[test]
fn test_explicit_null_wins() {
    let model = model();
    let service = MetadataContext::new(config()).with_model(&model);
    let person = person(1).with_id(WireValue::Null).with_edit_link(WireValue::Null);
    let builder = service.create_builder(&person, &people(), None).unwrap();

    assert_eq!(builder.id().unwrap(), None);
    assert_eq!(builder.edit_link().unwrap(), None);
    assert_eq!(builder.navigation_link_uri("Trips", &WireValue::Null).unwrap(), None);
}

#[test]
fn test_null_id_suppresses_computed_edit_link() {
    let model = model();
    let service = MetadataContext::new(config()).with_model(&model);
    let person = person(1).with_id(WireValue::Null);
    let builder = service.create_builder(&person, &people(), None).unwrap();

    assert_eq!(builder.id().unwrap(), None);
    assert_eq!(builder.edit_link().unwrap(), None);
    assert_eq!(builder.read_link().unwrap(), None);
}

#[test]
fn test_wire_id_seeds_edit_link() {
    let model = model();
    let service = MetadataContext::new(config()).with_model(&model);
    let person = person(1).with_id(url("http://other/People(9)"));
    let builder = service.create_builder(&person, &people(), None).unwrap();

    assert_eq!(builder.edit_link().unwrap(), Some(url("http://other/People(9)")));
}

#[test]
fn test_transient_resource_has_no_identity() {
    let model = model();
    let service = MetadataContext::new(config()).with_model(&model);
    let person = person(1).transient();
    let builder = service.create_builder(&person, &people(), None).unwrap();

    assert_eq!(builder.id().unwrap(), None);
    assert_eq!(builder.edit_link().unwrap(), None);
    assert_eq!(builder.read_link().unwrap(), None);
    assert_eq!(builder.id_for_serialization().unwrap(), WireValue::Null);
}

#[test]
fn test_unknown_navigation_source() {
    let model = model();
    let service = MetadataContext::new(config()).with_model(&model);
    let person = person(1);
    let builder = service
        .create_builder(&person, &ResourceScope::for_navigation_source("Nope").with_expected_type("NS.Person"), None)
        .unwrap();

    assert_eq!(
        builder.id().unwrap_err(),
        MetadataError::UnknownNavigationSource {
            navigation_source: Some("Nope".to_string())
        }
    );
}

#[test]
fn test_no_model_and_no_serialization_info_is_unknown_source() {
    let service = MetadataContext::new(config());
    let item = Resource::new("NS.Person").with_property(Property::new("Id", 1i32).key());
    let scope = ResourceScope::for_navigation_source("People").from_collection();

    assert_eq!(service.type_context(&scope).navigation_source_kind, NavigationSourceKind::Unknown);
    let builder = service.create_builder(&item, &scope, None).unwrap();
    assert_eq!(
        builder.id().unwrap_err(),
        MetadataError::UnknownNavigationSource {
            navigation_source: Some("People".to_string())
        }
    );
}

#[test]
fn test_memoized_id_does_not_query_model_again() {
    init_logging();
    let model = CountingModel::new(model());
    let service = MetadataContext::new(config()).with_model(&model);
    let employee = employee(1);
    let builder = service.create_builder(&employee, &people(), None).unwrap();

    let before = model.lookups();
    let first = builder.id().unwrap();
    let after_first = model.lookups();
    let second = builder.id().unwrap();

    assert!(after_first > before);
    assert_eq!(model.lookups(), after_first);
    assert_eq!(first, second);

    builder.edit_link().unwrap();
    let after_edit = model.lookups();
    builder.edit_link().unwrap();
    builder.read_link().unwrap();
    assert_eq!(model.lookups(), after_edit);
}

// =============================================================================
// ETags
// =============================================================================

fn items() -> ResourceScope {
    ResourceScope::for_serialization_info(
        ResourceSerializationInfo::new("Items", NavigationSourceKind::EntitySet, "NS.Item").from_collection(),
    )
}

fn item() -> Resource {
    Resource::new("NS.Item").with_property(Property::new("Id", 1i32).key())
}

#[test]
fn test_etag_formatting() {
    let service = MetadataContext::new(config());

    let none = item();
    let builder = service.create_builder(&none, &items(), None).unwrap();
    assert_eq!(builder.etag().unwrap(), None);

    let one = item().with_property(Property::new("Version", 5i32).etag());
    let builder = service.create_builder(&one, &items(), None).unwrap();
    assert_eq!(builder.etag().unwrap().as_deref(), Some("W/\"5\""));

    let two = item()
        .with_property(Property::new("Version", 5i32).etag())
        .with_property(Property::new("Tag", "x").etag());
    let builder = service.create_builder(&two, &items(), None).unwrap();
    assert_eq!(builder.etag().unwrap().as_deref(), Some("W/\"5,'x'\""));

    let quoted = item()
        .with_property(Property::new("Tag", "it's").etag())
        .with_property(Property::new("Gone", Value::Null).etag());
    let builder = service.create_builder(&quoted, &items(), None).unwrap();
    assert_eq!(builder.etag().unwrap().as_deref(), Some("W/\"'it''s',null\""));
}

#[test]
fn test_serialization_info_without_model() {
    let service = MetadataContext::new(config());
    let item = item();
    let builder = service.create_builder(&item, &items(), None).unwrap();

    assert_eq!(builder.id().unwrap(), Some(url("http://host/service/Items(1)")));
    assert!(builder.actions().unwrap().is_empty());
    assert!(builder.next_unprocessed_navigation_link().is_none());
    assert_eq!(builder.media_resource().unwrap(), None);
}

#[test]
fn test_etag_from_concurrency_token() {
    let model = model();
    let service = MetadataContext::new(config()).with_model(&model);
    let person = person(1);
    let parent = service.create_builder(&person, &people(), None).unwrap();

    let trip = Resource::new("NS.Trip")
        .with_property(Property::new("TripId", 7i32))
        .with_property(Property::new("Budget", 10.0f64));
    let scope = ResourceScope::for_navigation_source("Trips").from_collection();
    let builder = service.create_builder(&trip, &scope, Some(&parent)).unwrap();

    assert_eq!(builder.etag().unwrap().as_deref(), Some("W/\"10.0\""));
}

// =============================================================================
// Streams
// =============================================================================

#[test]
fn test_media_resource_links() {
    let model = model();
    let service = MetadataContext::new(config()).with_model(&model);
    let document = Resource::new("NS.Document").with_property(Property::new("Id", 4i32));
    let scope = ResourceScope::for_navigation_source("Documents").from_collection();
    let builder = service.create_builder(&document, &scope, None).unwrap();

    let media = builder.media_resource().unwrap().unwrap();
    assert!(media.is_media_resource());
    assert_eq!(
        media.edit_link(&builder).unwrap(),
        Some(url("http://host/service/Documents(4)/$value"))
    );
    assert_eq!(
        builder.stream_read_link(None).unwrap(),
        Some(url("http://host/service/Documents(4)/$value"))
    );

    let person = person(1);
    let builder = service.create_builder(&person, &people(), None).unwrap();
    assert_eq!(builder.media_resource().unwrap(), None);
}

#[test]
fn test_computed_stream_properties() {
    let model = model();
    let service = MetadataContext::new(config()).with_model(&model);
    let person = person(1);
    let builder = service.create_builder(&person, &people(), None).unwrap();

    let properties = builder.properties(person.properties()).unwrap();
    let names: Vec<&str> = properties.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Id", "Name", "Photo"]);

    let Value::Stream(photo) = &properties[2].value else {
        panic!("expected a stream value");
    };
    assert_eq!(
        photo.read_link(&builder).unwrap(),
        Some(url("http://host/service/People(1)/Photo"))
    );
}

#[test]
fn test_wire_stream_property_wins() {
    let model = model();
    let service = MetadataContext::new(config()).with_model(&model);
    let photo = StreamReference::named("Photo").with_read_link(url("http://cdn/photo.png"));
    let person = person(1).with_property(Property::new("Photo", photo));
    let builder = service.create_builder(&person, &people(), None).unwrap();

    let properties = builder.properties(person.properties()).unwrap();
    assert_eq!(properties.len(), 3);
    let Value::Stream(photo) = &properties[2].value else {
        panic!("expected a stream value");
    };
    assert_eq!(photo.read_link(&builder).unwrap(), Some(url("http://cdn/photo.png")));
}

#[test]
fn test_empty_stream_name_is_rejected() {
    let model = model();
    let service = MetadataContext::new(config()).with_model(&model);
    let person = person(1);
    let builder = service.create_builder(&person, &people(), None).unwrap();

    assert_eq!(
        builder.stream_edit_link(Some("")).unwrap_err(),
        MetadataError::EmptyArgument {
            parameter: "stream_property"
        }
    );
}

// =============================================================================
// Navigation links
// =============================================================================

#[test]
fn test_navigation_link_iteration() {
    let model = model();
    let service = MetadataContext::new(config()).with_model(&model);
    let person = person(1);
    let builder = service.create_builder(&person, &people(), None).unwrap();

    builder.mark_navigation_link_processed("Trips");
    let link = builder.next_unprocessed_navigation_link().unwrap();
    assert_eq!(link.name, "BestFriend");
    assert!(!link.is_collection);
    assert_eq!(
        link.url(&builder).unwrap(),
        Some(url("http://host/service/People(1)/BestFriend"))
    );
    assert_eq!(
        link.association_link_url(&builder).unwrap(),
        Some(url("http://host/service/People(1)/BestFriend/$ref"))
    );
    assert!(builder.next_unprocessed_navigation_link().is_none());
}

#[test]
fn test_navigation_links_follow_selection() {
    let model = model();
    let service = MetadataContext::new(config()).with_model(&model);
    let person = person(1);
    let scope = people().with_selected(SelectedProperties::parse("Name,Trips"));
    let builder = service.create_builder(&person, &scope, None).unwrap();

    let link = builder.next_unprocessed_navigation_link().unwrap();
    assert_eq!(link.name, "Trips");
    assert!(link.is_collection);
    assert!(builder.next_unprocessed_navigation_link().is_none());

    // Photo is not selected.
    assert_eq!(builder.properties(person.properties()).unwrap().len(), 2);
}

#[test]
fn test_explicit_navigation_link_is_echoed() {
    let model = model();
    let service = MetadataContext::new(config()).with_model(&model);
    let person = person(1);
    let builder = service.create_builder(&person, &people(), None).unwrap();

    let explicit = url("http://elsewhere/trips");
    assert_eq!(
        builder
            .navigation_link_uri("Trips", &WireValue::Value(explicit.clone()))
            .unwrap(),
        Some(explicit)
    );
    assert_eq!(
        builder.association_link_uri("Trips", &WireValue::Unset).unwrap(),
        Some(url("http://host/service/People(1)/Trips/$ref"))
    );
}

// =============================================================================
// Operations
// =============================================================================

#[test]
fn test_computed_operations() {
    let model = model();
    let service = MetadataContext::new(config()).with_model(&model);
    let person = person(1);
    let builder = service.create_builder(&person, &people(), None).unwrap();

    let actions = builder.actions().unwrap();
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].title().as_deref(), Some("NS.ShareTrip"));
    assert_eq!(
        actions[0].metadata.as_str(),
        "http://host/service/$metadata#NS.ShareTrip"
    );
    assert_eq!(
        actions[0].target(&builder).unwrap(),
        Some(url("http://host/service/People(1)/NS.ShareTrip"))
    );

    let functions = builder.functions().unwrap();
    assert_eq!(functions.len(), 1);
    assert_eq!(functions[0].qualified_name(), "NS.GetFavoriteAirline");
}

#[test]
fn test_operation_targets_on_derived_type() {
    let model = model();
    let service = MetadataContext::new(config()).with_model(&model);
    let employee = employee(2);
    let builder = service.create_builder(&employee, &people(), None).unwrap();

    let actions = builder.actions().unwrap();
    let targets: Vec<String> = actions
        .iter()
        .map(|a| a.target(&builder).unwrap().unwrap().to_string())
        .collect();
    assert_eq!(
        targets,
        vec![
            "http://host/service/People(2)/NS.Person/NS.ShareTrip",
            "http://host/service/People(2)/NS.Employee/NS.Promote",
        ]
    );
}

#[test]
fn test_wire_operations_are_not_duplicated() {
    init_logging();
    let model = model();
    let service = MetadataContext::new(config()).with_model(&model);
    let share = Operation::action(url("http://host/service/$metadata#NS.ShareTrip"))
        .with_target(url("http://host/service/People(1)/Share"));
    let person = person(1).with_action(share);
    let builder = service.create_builder(&person, &people(), None).unwrap();

    let actions = builder.actions().unwrap();
    assert_eq!(actions.len(), 1);
    assert_eq!(
        actions[0].target(&builder).unwrap(),
        Some(url("http://host/service/People(1)/Share"))
    );
}

#[test]
fn test_operations_follow_selection() {
    let model = model();
    let service = MetadataContext::new(config()).with_model(&model);
    let person = person(1);
    let scope = people().with_selected(SelectedProperties::parse("Name,NS.GetFavoriteAirline"));
    let builder = service.create_builder(&person, &scope, None).unwrap();

    assert!(builder.actions().unwrap().is_empty());
    assert_eq!(builder.functions().unwrap().len(), 1);
}
