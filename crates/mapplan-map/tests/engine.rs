use mapplan_map::{MappingCatalog, Planner};
use mapplan_model::{
    DiagnosticKind, MappingKind, NameMatching, NumericKind, PlanKey, PlanSet, PropertySchema,
    ResolveOptions, TypeRef, TypeSchema,
};

fn prop(name: &str, ty: &str) -> PropertySchema {
    PropertySchema::new(name, ty.parse().expect("type reference"))
}

fn record(name: &str, ty: TypeRef) -> PropertySchema {
    PropertySchema::new(name, ty)
}

fn schema(id: &str, properties: Vec<PropertySchema>) -> TypeSchema {
    TypeSchema {
        id: id.into(),
        properties,
    }
}

fn catalog(schemas: Vec<TypeSchema>) -> MappingCatalog {
    let mut catalog = MappingCatalog::new();
    for schema in schemas {
        catalog.add_schema(schema).expect("register schema");
    }
    catalog
}

fn plan(catalog: &MappingCatalog, source: &str, dest: &str) -> PlanSet {
    Planner::new(catalog, ResolveOptions::default()).plan(source, dest)
}

fn strict_plan(catalog: &MappingCatalog, source: &str, dest: &str) -> PlanSet {
    Planner::new(catalog, ResolveOptions::strict()).plan(source, dest)
}

fn kinds(set: &PlanSet, key: &PlanKey) -> Vec<(String, MappingKind)> {
    set.plan(key)
        .expect("plan present")
        .mappings
        .iter()
        .map(|m| (m.destination.name.clone(), m.kind.clone()))
        .collect()
}

fn person_catalog() -> MappingCatalog {
    catalog(vec![
        schema(
            "Person",
            vec![
                prop("Name", "String"),
                prop("Age", "Int32"),
                record("Contact", TypeRef::record("ContactInfo")),
            ],
        ),
        schema(
            "PersonDto",
            vec![
                prop("Name", "String"),
                prop("Age", "Int32"),
                record("Contact", TypeRef::record("ContactInfoDto")),
            ],
        ),
        schema("ContactInfo", vec![prop("Email", "String")]),
        schema("ContactInfoDto", vec![prop("Email", "String")]),
    ])
}

#[test]
fn person_to_dto_resolves_nested_contact() {
    let catalog = person_catalog();
    let set = plan(&catalog, "Person", "PersonDto");
    let contact = PlanKey::new("ContactInfo", "ContactInfoDto");

    assert_eq!(set.root, PlanKey::new("Person", "PersonDto"));
    assert_eq!(set.len(), 2);
    assert_eq!(
        kinds(&set, &set.root),
        vec![
            ("Name".to_string(), MappingKind::Direct),
            ("Age".to_string(), MappingKind::Direct),
            ("Contact".to_string(), MappingKind::NestedObject(contact.clone())),
        ]
    );
    assert_eq!(
        kinds(&set, &contact),
        vec![("Email".to_string(), MappingKind::Direct)]
    );
    assert_eq!(set.root_plan().unwrap().mapping("Contact").unwrap().source, "Contact");
    assert!(set.diagnostics.is_empty());
}

#[test]
fn mutually_referencing_types_terminate() {
    let catalog = catalog(vec![
        schema(
            "A",
            vec![prop("Id", "Int32"), record("Partner", TypeRef::record("B"))],
        ),
        schema(
            "B",
            vec![prop("Id", "Int32"), record("Partner", TypeRef::record("A"))],
        ),
    ]);
    let set = plan(&catalog, "A", "B");
    let forward = PlanKey::new("A", "B");
    let backward = PlanKey::new("B", "A");

    assert_eq!(
        set.plan(&forward).unwrap().mapping("Partner").unwrap().kind,
        MappingKind::NestedObject(backward.clone())
    );
    assert_eq!(
        set.plan(&backward).unwrap().mapping("Partner").unwrap().kind,
        MappingKind::NestedObject(forward)
    );
    assert_eq!(set.len(), 2);
}

#[test]
fn self_referencing_type_points_at_its_own_plan() {
    let catalog = catalog(vec![
        schema(
            "Node",
            vec![
                prop("Value", "Int32"),
                record("Next", TypeRef::nullable(TypeRef::record("Node"))),
                record("Children", TypeRef::list(TypeRef::record("Node"))),
            ],
        ),
        schema(
            "NodeDto",
            vec![
                prop("Value", "Int64"),
                record("Next", TypeRef::record("NodeDto")),
                record("Children", TypeRef::array(TypeRef::record("NodeDto"))),
            ],
        ),
    ]);
    let set = plan(&catalog, "Node", "NodeDto");
    let own = set.root.clone();
    assert_eq!(
        kinds(&set, &own),
        vec![
            ("Value".to_string(), MappingKind::NumericWiden),
            ("Next".to_string(), MappingKind::NestedObject(own.clone())),
            ("Children".to_string(), MappingKind::CollectionOfComplex(own.clone())),
        ]
    );
    assert_eq!(set.len(), 1);
}

#[test]
fn ignore_wins_over_rename() {
    let mut catalog = person_catalog();
    catalog
        .configure("Person", "PersonDto")
        .rename("Name", "Age")
        .unwrap()
        .ignore("Name")
        .unwrap();
    let set = plan(&catalog, "Person", "PersonDto");
    assert!(set.root_plan().unwrap().mapping("Name").is_none());
    assert_eq!(set.root_plan().unwrap().len(), 2);
}

#[test]
fn numeric_kinds_widen_both_ways() {
    let catalog = catalog(vec![
        schema("Small", vec![prop("Count", "Int32")]),
        schema("Large", vec![prop("Count", "Int64")]),
    ]);
    for (source, dest) in [("Small", "Large"), ("Large", "Small")] {
        let set = plan(&catalog, source, dest);
        assert_eq!(
            set.root_plan().unwrap().mapping("Count").unwrap().kind,
            MappingKind::NumericWiden,
            "{source} -> {dest}"
        );
    }

    let narrowing = strict_plan(&catalog, "Large", "Small");
    assert_eq!(narrowing.root_plan().unwrap().len(), 1);
    assert_eq!(
        narrowing.diagnostics[0].kind,
        DiagnosticKind::NarrowingConversion {
            from: NumericKind::Int64,
            to: NumericKind::Int32
        }
    );
    assert!(strict_plan(&catalog, "Small", "Large").diagnostics.is_empty());
}

#[test]
fn collections_of_records_reference_element_plan() {
    let catalog = catalog(vec![
        schema(
            "Customer",
            vec![
                record("Orders", TypeRef::list(TypeRef::record("Order"))),
                prop("Tags", "List<Int32>"),
            ],
        ),
        schema(
            "CustomerDto",
            vec![
                record("Orders", TypeRef::array(TypeRef::record("OrderDto"))),
                prop("Tags", "Int64[]"),
            ],
        ),
        schema("Order", vec![prop("Total", "decimal")]),
        schema("OrderDto", vec![prop("Total", "decimal?")]),
    ]);
    let set = plan(&catalog, "Customer", "CustomerDto");
    let orders = PlanKey::new("Order", "OrderDto");
    assert_eq!(
        kinds(&set, &set.root),
        vec![
            ("Orders".to_string(), MappingKind::CollectionOfComplex(orders.clone())),
            ("Tags".to_string(), MappingKind::CollectionOfPrimitive),
        ]
    );
    assert_eq!(
        kinds(&set, &orders),
        vec![("Total".to_string(), MappingKind::Direct)]
    );
}

#[test]
fn nested_record_without_schema_is_left_out() {
    let catalog = catalog(vec![
        schema("Person", vec![record("Contact", TypeRef::record("ContactInfo"))]),
        schema("PersonDto", vec![record("Contact", TypeRef::record("ContactInfoDto"))]),
    ]);
    let set = strict_plan(&catalog, "Person", "PersonDto");
    assert!(set.root_plan().unwrap().is_empty());
    assert_eq!(set.len(), 1);
    assert_eq!(
        set.diagnostics[0].kind,
        DiagnosticKind::MissingSchema {
            type_id: "ContactInfo".into()
        }
    );
}

#[test]
fn missing_root_schema_yields_empty_plan() {
    let catalog = person_catalog();
    let set = strict_plan(&catalog, "Person", "Nobody");
    assert!(set.root_plan().unwrap().is_empty());
    assert_eq!(set.diagnostics.len(), 1);
    assert_eq!(set.diagnostics[0].property, None);
}

fn event_catalog() -> MappingCatalog {
    let mut catalog = catalog(vec![
        schema(
            "Event",
            vec![
                prop("At", "DateTime"),
                prop("Until", "DateTime"),
                prop("Note", "String"),
                prop("IsPublic", "bool"),
                prop("IsDraft", "bool?"),
                prop("Title", "String"),
            ],
        ),
        schema(
            "EventDto",
            vec![
                prop("At", "String"),
                prop("Until", "Int64"),
                prop("Note", "String"),
                prop("Title", "String"),
            ],
        ),
    ]);
    catalog
        .add_converter("DateToText", "DateTime".parse().unwrap(), "String".parse().unwrap())
        .unwrap();
    catalog
        .configure("Event", "EventDto")
        .convert("At", "DateToText")
        .unwrap()
        .convert("Until", "DateToText")
        .unwrap()
        .convert("Note", "Missing")
        .unwrap()
        .when("Note", "IsPublic")
        .unwrap()
        .when("Title", "IsDraft")
        .unwrap();
    catalog
}

#[test]
fn converters_apply_only_on_matching_signature() {
    let catalog = event_catalog();
    let set = strict_plan(&catalog, "Event", "EventDto");
    let root = set.root_plan().unwrap();

    assert_eq!(
        root.mapping("At").unwrap().kind,
        MappingKind::Converter("DateToText".into())
    );
    // DateTime -> Int64 falls through to the structural rules and is dropped.
    assert!(root.mapping("Until").is_none());
    // Unknown converter falls through to Direct.
    assert_eq!(
        root.mapping("Note").unwrap().kind,
        MappingKind::Direct.when("IsPublic")
    );

    let codes: Vec<_> = set
        .diagnostics
        .iter()
        .map(|d| (d.property.as_deref().unwrap_or_default(), d.kind.clone()))
        .collect();
    assert!(codes.contains(&(
        "Until",
        DiagnosticKind::ConverterMismatch {
            converter: "DateToText".into()
        }
    )));
    assert!(codes.contains(&(
        "Until",
        DiagnosticKind::Incompatible {
            source: "Until".to_string()
        }
    )));
    assert!(codes.contains(&(
        "Note",
        DiagnosticKind::UnknownConverter {
            converter: "Missing".into()
        }
    )));
}

#[test]
fn condition_must_name_a_readable_bool() {
    let catalog = event_catalog();
    let set = strict_plan(&catalog, "Event", "EventDto");
    // Nullable bool is not a valid condition: the wrapper is dropped.
    assert_eq!(set.root_plan().unwrap().mapping("Title").unwrap().kind, MappingKind::Direct);
    assert!(set.diagnostics.iter().any(|d| d.kind
        == DiagnosticKind::InvalidCondition {
            condition: "IsDraft".to_string()
        }));
}

fn ticket_catalog() -> MappingCatalog {
    let mut catalog = catalog(vec![
        schema(
            "Ticket",
            vec![
                prop("Opened", "DateTime"),
                prop("Closed", "DateTime"),
                prop("Notes", "String"),
                prop("IsOpen", "bool"),
                PropertySchema::write_only("IsSecret", TypeRef::named("bool")),
            ],
        ),
        schema(
            "TicketDto",
            vec![prop("Opened", "String"), prop("Closed", "String"), prop("Notes", "String")],
        ),
    ]);
    catalog
        .add_converter("DateToText", TypeRef::named("DateTime"), TypeRef::named("String"))
        .unwrap();
    catalog
        .configure("Ticket", "TicketDto")
        .convert("Opened", "DateToText")
        .unwrap()
        .when("Opened", "IsOpen")
        .unwrap()
        .convert("Closed", "DateToText")
        .unwrap()
        .when("Closed", "IsResolved")
        .unwrap()
        .when("Notes", "IsSecret")
        .unwrap();
    catalog
}

#[test]
fn matching_converter_is_wrapped_by_its_condition() {
    let catalog = ticket_catalog();
    let set = strict_plan(&catalog, "Ticket", "TicketDto");
    assert_eq!(
        set.root_plan().unwrap().mapping("Opened").unwrap().kind,
        MappingKind::Converter("DateToText".into()).when("IsOpen")
    );
    assert!(!set.diagnostics.iter().any(|d| d.property.as_deref() == Some("Opened")));
}

#[test]
fn missing_or_unreadable_condition_keeps_the_unconditional_kind() {
    let catalog = ticket_catalog();
    let set = strict_plan(&catalog, "Ticket", "TicketDto");
    let root = set.root_plan().unwrap();

    assert_eq!(
        root.mapping("Closed").unwrap().kind,
        MappingKind::Converter("DateToText".into())
    );
    assert_eq!(root.mapping("Notes").unwrap().kind, MappingKind::Direct);

    let invalid: Vec<_> = set
        .diagnostics
        .iter()
        .filter(|d| matches!(d.kind, DiagnosticKind::InvalidCondition { .. }))
        .map(|d| (d.property.as_deref().unwrap_or_default(), d.kind.clone()))
        .collect();
    assert_eq!(
        invalid,
        vec![
            (
                "Closed",
                DiagnosticKind::InvalidCondition {
                    condition: "IsResolved".to_string()
                }
            ),
            (
                "Notes",
                DiagnosticKind::InvalidCondition {
                    condition: "IsSecret".to_string()
                }
            ),
        ]
    );
}

#[test]
fn unrelated_generic_records_are_not_assigned_directly() {
    let catalog = catalog(vec![
        schema(
            "Settings",
            vec![
                prop("Lookup", "Dictionary<String, Int32>"),
                prop("Same", "Dictionary<String, Int32>"),
            ],
        ),
        schema(
            "SettingsDto",
            vec![
                prop("Lookup", "Dictionary<Int32, Guid>"),
                prop("Same", "Dictionary<String, Int32>"),
            ],
        ),
    ]);
    let set = strict_plan(&catalog, "Settings", "SettingsDto");
    let root = set.root_plan().unwrap();

    assert!(root.mapping("Lookup").is_none());
    assert_eq!(root.mapping("Same").unwrap().kind, MappingKind::Direct);
    assert_eq!(set.diagnostics.len(), 1);
    assert_eq!(set.diagnostics[0].property.as_deref(), Some("Lookup"));
    assert_eq!(
        set.diagnostics[0].kind,
        DiagnosticKind::MissingSchema {
            type_id: "Dictionary<String, Int32>".into()
        }
    );
}

#[test]
fn conditional_wraps_nested_kinds() {
    let mut catalog = person_catalog();
    let person = schema(
        "Person2",
        vec![
            prop("HasContact", "Boolean"),
            record("Contact", TypeRef::record("ContactInfo")),
        ],
    );
    catalog.add_schema(person).unwrap();
    catalog
        .configure("Person2", "PersonDto")
        .when("Contact", "HasContact")
        .unwrap();

    let set = plan(&catalog, "Person2", "PersonDto");
    let contact = set.root_plan().unwrap().mapping("Contact").unwrap();
    assert_eq!(contact.kind.condition(), Some("HasContact"));
    assert_eq!(
        contact.kind.nested_plan(),
        Some(&PlanKey::new("ContactInfo", "ContactInfoDto"))
    );
    assert_eq!(set.len(), 2);
}

#[test]
fn dangling_rename_is_omitted() {
    let mut catalog = person_catalog();
    catalog
        .configure("Person", "PersonDto")
        .rename("Name", "FullName")
        .unwrap();
    let set = strict_plan(&catalog, "Person", "PersonDto");
    assert!(set.root_plan().unwrap().mapping("Name").is_none());
    assert_eq!(
        set.diagnostics[0].kind,
        DiagnosticKind::DanglingRename {
            source: "FullName".to_string()
        }
    );

    let silent = plan(&catalog, "Person", "PersonDto");
    assert!(silent.diagnostics.is_empty());
    assert_eq!(silent.plans, set.plans);
}

#[test]
fn accessors_restrict_what_maps() {
    let catalog = catalog(vec![
        schema(
            "Account",
            vec![
                PropertySchema::write_only("Password", "String".parse().unwrap()),
                prop("Login", "String"),
                PropertySchema::read_only("Display", "String".parse().unwrap()),
            ],
        ),
        schema(
            "AccountDto",
            vec![
                prop("Password", "String"),
                PropertySchema::read_only("Login", "String".parse().unwrap()),
                prop("Display", "String"),
            ],
        ),
    ]);
    let set = strict_plan(&catalog, "Account", "AccountDto");
    assert_eq!(
        kinds(&set, &set.root),
        vec![("Display".to_string(), MappingKind::Direct)]
    );
    assert_eq!(
        set.diagnostics[0].kind,
        DiagnosticKind::SourceNotReadable {
            source: "Password".to_string()
        }
    );
    // Read-only destinations are never considered, so no diagnostic either.
    assert_eq!(set.diagnostics.len(), 1);
}

#[test]
fn ignore_case_matching_is_opt_in() {
    let catalog = catalog(vec![
        schema("Row", vec![prop("first_name", "String"), prop("AGE", "Int32")]),
        schema("RowDto", vec![prop("First_Name", "String"), prop("Age", "Int32")]),
    ]);
    assert!(plan(&catalog, "Row", "RowDto").root_plan().unwrap().is_empty());

    let options = ResolveOptions::default().with_name_matching(NameMatching::IgnoreCase);
    let set = Planner::new(&catalog, options).plan("Row", "RowDto");
    let sources: Vec<_> = set.root_plan().unwrap().mappings.iter().map(|m| m.source.as_str()).collect();
    assert_eq!(sources, vec!["first_name", "AGE"]);
}

#[test]
fn declared_pairs_resolve_independently() {
    let mut catalog = person_catalog();
    catalog.declare_bidirectional("Person", "PersonDto");
    catalog.declare("ContactInfo", "ContactInfoDto");

    let sets = Planner::new(&catalog, ResolveOptions::default()).plan_declared();
    let roots: Vec<_> = sets.iter().map(|s| s.root.to_string()).collect();
    assert_eq!(
        roots,
        vec![
            "Person -> PersonDto",
            "PersonDto -> Person",
            "ContactInfo -> ContactInfoDto"
        ]
    );
    assert_eq!(sets[0], plan(&catalog, "Person", "PersonDto"));
    assert_eq!(
        sets[1].root_plan().unwrap().mapping("Contact").unwrap().kind,
        MappingKind::NestedObject(PlanKey::new("ContactInfoDto", "ContactInfo"))
    );
}

#[test]
fn destination_without_writable_properties_is_empty() {
    let catalog = catalog(vec![
        schema("A", vec![prop("X", "Int32")]),
        schema(
            "B",
            vec![PropertySchema::read_only("X", "Int32".parse().unwrap())],
        ),
    ]);
    let set = strict_plan(&catalog, "A", "B");
    assert!(set.root_plan().unwrap().is_empty());
    assert!(set.diagnostics.is_empty());
}
