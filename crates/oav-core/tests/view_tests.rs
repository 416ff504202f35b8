use oav_core::Document;
use oav_core::parse::operation::HttpMethod;
use oav_core::parse::parameter::ParameterLocation;
use oav_core::view::{GroupBy, endpoints, group_endpoints, operation_view};
use serde_json::json;

const PETSTORE: &str = include_str!("fixtures/petstore.yaml");
const CYCLIC: &str = include_str!("fixtures/cyclic.yaml");

fn doc(input: &str) -> Document {
    Document::from_yaml(input).expect("fixture should parse")
}

#[test]
fn endpoints_list_in_document_order() {
    let document = doc(PETSTORE);
    let listing = endpoints(&document);

    let rows: Vec<(&str, HttpMethod)> = listing
        .iter()
        .map(|e| (e.path.as_str(), e.method))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("/pets", HttpMethod::Get),
            ("/pets", HttpMethod::Post),
            ("/pets/{petId}", HttpMethod::Get),
            ("/pets/{petId}", HttpMethod::Delete),
            ("/health", HttpMethod::Get),
        ]
    );

    let delete = &listing[3];
    assert!(delete.deprecated);
    assert_eq!(delete.operation_id.as_deref(), Some("deletePet"));

    let health = &listing[4];
    assert!(health.tags.is_empty());
    assert_eq!(health.summary.as_deref(), Some("Service liveness probe"));
}

#[test]
fn endpoints_group_by_path() {
    let document = doc(PETSTORE);
    let listing = endpoints(&document);
    let groups = group_endpoints(&listing, GroupBy::Path);

    let keys: Vec<&String> = groups.keys().collect();
    assert_eq!(keys, vec!["/pets", "/pets/{petId}", "/health"]);
    assert_eq!(groups["/pets"].len(), 2);
}

#[test]
fn endpoints_group_by_tag_buckets_untagged() {
    let document = doc(PETSTORE);
    let listing = endpoints(&document);
    let groups = group_endpoints(&listing, GroupBy::Tag);

    assert_eq!(groups["pets"].len(), 4);
    assert_eq!(groups["untagged"].len(), 1);
    assert_eq!(groups["untagged"][0].path, "/health");
}

#[test]
fn operation_view_resolves_component_parameters() {
    let document = doc(PETSTORE);
    let view = operation_view(&document, "/pets", HttpMethod::Get)
        .expect("view should build")
        .expect("operation exists");

    assert!(view.unresolved.is_empty());
    assert_eq!(view.operation_id.as_deref(), Some("listPets"));
    assert_eq!(view.parameters.len(), 2);

    // The `$ref` parameter is inlined from components.parameters.
    let limit = &view.parameters[0];
    assert_eq!(limit.name, "limit");
    assert_eq!(limit.location, ParameterLocation::Query);
    assert!(!limit.required);
    assert_eq!(limit.type_hint.as_deref(), Some("integer (int32)"));
    let schema = limit.schema.as_ref().expect("limit schema");
    assert_eq!(schema["type"], json!("integer"));

    let offset = &view.parameters[1];
    assert_eq!(offset.name, "offset");
    assert_eq!(offset.type_hint.as_deref(), Some("integer (int32)"));
}

#[test]
fn operation_view_expands_request_body_through_ref_chain() {
    let document = doc(PETSTORE);
    let view = operation_view(&document, "/pets", HttpMethod::Post)
        .expect("view should build")
        .expect("operation exists");

    let body = view.request_body.as_ref().expect("request body");
    assert!(body.required);
    assert_eq!(body.description.as_deref(), Some("Pet to add to the store"));

    // NewPetBody → NewPet → allOf[Pet → Category], fully inlined.
    let schema = body.content["application/json"]
        .schema
        .as_ref()
        .expect("body schema");
    assert_eq!(
        schema["allOf"][0]["properties"]["category"]["properties"]["name"]["type"],
        json!("string")
    );
    assert_eq!(
        schema["allOf"][1]["properties"]["tagNames"]["type"],
        json!("array")
    );
}

#[test]
fn operation_view_resolves_response_refs_and_examples() {
    let document = doc(PETSTORE);
    let view = operation_view(&document, "/pets/{petId}", HttpMethod::Get)
        .expect("view should build")
        .expect("operation exists");

    assert_eq!(view.responses.len(), 2);

    let ok = &view.responses[0];
    assert_eq!(ok.status, "200");
    let media = &ok.content["application/json"];
    let schema = media.schema.as_ref().expect("200 schema");
    assert_eq!(
        schema["properties"]["category"]["properties"]["id"]["format"],
        json!("int64")
    );
    assert_eq!(media.example, Some(json!({ "id": 1, "name": "doggie" })));

    // 404 comes from a component response ref; its example is picked from
    // `examples.default.value`.
    let not_found = &view.responses[1];
    assert_eq!(not_found.status, "404");
    assert_eq!(not_found.description, "The specified resource was not found");
    let media = &not_found.content["application/json"];
    assert_eq!(
        media.example,
        Some(json!({ "code": 404, "message": "not found" }))
    );
    let schema = media.schema.as_ref().expect("404 schema");
    assert_eq!(schema["properties"]["message"]["type"], json!("string"));
}

#[test]
fn operation_view_marks_cycles_in_rendered_schemas() {
    let document = doc(CYCLIC);
    let view = operation_view(&document, "/nodes", HttpMethod::Get)
        .expect("view should build")
        .expect("operation exists");

    let schema = view.responses[0].content["application/json"]
        .schema
        .as_ref()
        .expect("node schema");
    let next = &schema["properties"]["next"];
    assert_eq!(next["_circularResolved"], json!(true));
    assert_eq!(next["$ref"], json!("#/components/schemas/Node"));
}

#[test]
fn operation_view_reports_dangling_pointers() {
    let yaml = r#"
openapi: "3.0.0"
info:
  title: Broken
  version: "1.0"
paths:
  /things:
    get:
      operationId: listThings
      parameters:
        - $ref: '#/components/parameters/Missing'
      responses:
        '200':
          description: OK
"#;
    let document = doc(yaml);
    let view = operation_view(&document, "/things", HttpMethod::Get)
        .expect("view should build")
        .expect("operation exists");

    assert!(view.parameters.is_empty());
    assert_eq!(view.unresolved, vec!["#/components/parameters/Missing"]);
    // The rest of the view is still usable.
    assert_eq!(view.responses.len(), 1);
}

#[test]
fn operation_view_is_none_for_unknown_routes() {
    let document = doc(PETSTORE);
    assert!(
        operation_view(&document, "/nope", HttpMethod::Get)
            .expect("view should build")
            .is_none()
    );
    assert!(
        operation_view(&document, "/pets", HttpMethod::Trace)
            .expect("view should build")
            .is_none()
    );
}
