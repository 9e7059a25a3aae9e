use pretty_assertions::assert_eq;
use tablegen_codegen::generate_table;
use tablegen_core::schema::Table;
use tablegen_core::TableMapping;

fn tables() -> Vec<Table> {
    serde_json::from_str(
        r#"[
            {
                "id": "tblPeople",
                "name": "People",
                "fields": [
                    { "id": "fldName", "name": "Full Name", "type": "singleLineText" },
                    { "id": "fldMail", "name": "Email", "type": "email" },
                    {
                        "id": "fldRole",
                        "name": "Current Role",
                        "type": "multipleRecordLinks",
                        "options": { "linkedTableId": "tblRoles" }
                    },
                    {
                        "id": "fldRoleName",
                        "name": "Current Role Name",
                        "type": "multipleLookupValues",
                        "options": {
                            "recordLinkFieldId": "fldRole",
                            "fieldIdInLinkedTable": "fldTitle"
                        }
                    },
                    { "id": "fldDocs", "name": "Docs", "type": "multipleAttachments" }
                ]
            },
            {
                "id": "tblRoles",
                "name": "Roles",
                "fields": [
                    { "id": "fldTitle", "name": "Name", "type": "singleLineText" }
                ]
            }
        ]"#,
    )
    .unwrap()
}

#[test]
fn generates_schema_and_client_modules() {
    let all = tables();
    let mapping = TableMapping::build(&all[0], &all, None);
    let files = generate_table(&mapping).unwrap();

    assert_eq!(files.len(), 2);
    let schema = &files[0];
    let client = &files[1];
    assert_eq!(schema.path, "people.ts");
    assert_eq!(client.path, "peopleClient.ts");

    // No marker survives rendering.
    for file in &files {
        assert!(!file.contents.contains("{{"), "{}", file.path);
    }

    assert!(schema.contents.contains("fullName: z.string().nullish(),"));
    assert!(schema
        .contents
        .contains("email: z.string().email().nullish(),"));
    // The lookup rides inside the link object, not as a top-level entry.
    assert!(schema
        .contents
        .contains("currentRole: z.array(z.object({ id: z.string(), name: z.string().nullish() })).nullish(),"));
    // Attachment usage pulls in the shared schema import.
    assert!(schema
        .contents
        .contains("import { Attachment, attachmentSchema } from \"./attachment\";"));
    // Property map carries the dotted lookup path plus its flags.
    assert!(schema.contents.contains(
        "\"Current Role Name\": { property: \"currentRole.name\", editable: false, required: false, list: true },"
    ));
    // Queryable list is sorted.
    assert!(schema.contents.contains("\"currentRole.name\","));

    assert!(client.contents.contains("export class PersonClient"));
    assert!(client.contents.contains("`/people/${id}`"));
}

#[test]
fn declared_coercions_surface_in_output() {
    use tablegen_core::config::{ColumnOverride, TableConfig, TypeOverride};

    let all = tables();
    let mut config = TableConfig::defaults("People");
    config.overrides.insert(
        "Full Name".to_string(),
        ColumnOverride {
            ty: Some(TypeOverride::String),
            ..ColumnOverride::default()
        },
    );

    let mapping = TableMapping::build(&all[0], &all, Some(&config));
    let files = generate_table(&mapping).unwrap();
    assert!(files[0].contents.contains("\"Full Name\": \"string\","));
}

#[test]
fn regeneration_is_byte_identical() {
    let all = tables();
    let mapping = TableMapping::build(&all[0], &all, None);
    let first = generate_table(&mapping).unwrap();
    let second = generate_table(&TableMapping::build(&all[0], &all, None)).unwrap();
    assert_eq!(first, second);
}
