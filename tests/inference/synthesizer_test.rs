#[cfg(test)]
mod tests {
    use insta::assert_snapshot;
    use workbook_agent::config::{InferenceMode, InferenceSettings};
    use workbook_agent::inference::{SchemaInferenceError, SchemaSynthesizer, TypeTable};
    use workbook_agent::model::{Constraint, FieldConfig, FieldType, Record, BLUEPRINT_NAME};

    fn tagged_records() -> Vec<Record> {
        vec![
            Record::new()
                .with("Field Name", "Type")
                .with("Name", "String")
                .with("Color", "Enumeration")
                .with("Age", "Int"),
            Record::new()
                .with("Field Name", "Is Required?")
                .with("Name", "x")
                .with("Color", "")
                .with("Age", ""),
            Record::new()
                .with("Field Name", "Is Unique?")
                .with("Name", "x")
                .with("Color", "")
                .with("Age", ""),
            Record::new()
                .with("Field Name", "Enumerations")
                .with("Name", "")
                .with("Color", "Red, Green")
                .with("Age", ""),
        ]
    }

    #[test]
    fn test_empty_records_never_produce_blueprint() {
        let synth = SchemaSynthesizer::default();
        let headers = vec!["Name".to_string(), "Age".to_string()];

        assert_eq!(
            synth.synthesize(&headers, &[]),
            Err(SchemaInferenceError::EmptyRecords)
        );
        assert_eq!(
            synth.synthesize_records(&[]),
            Err(SchemaInferenceError::EmptyRecords)
        );
    }

    #[test]
    fn test_synthesis_is_idempotent() {
        let synth = SchemaSynthesizer::default();
        let records = tagged_records();

        let first = synth.synthesize_records(&records).unwrap();
        let second = synth.synthesize_records(&records).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_plain_record_uses_runtime_shape() {
        let records = vec![Record::new().with("Name", "Alice").with("Age", 30)];
        let blueprint = SchemaSynthesizer::default()
            .synthesize_records(&records)
            .unwrap();

        assert_eq!(blueprint.name, BLUEPRINT_NAME);
        assert_eq!(blueprint.fields.len(), 2);

        let name = blueprint.field("Name").unwrap();
        assert_eq!(name.field_type, FieldType::String);
        assert_eq!(
            name.config,
            Some(FieldConfig::String {
                size: "normal".to_string()
            })
        );

        let age = blueprint.field("Age").unwrap();
        assert_eq!(age.field_type, FieldType::Number);
        assert!(age.constraints.is_empty());
    }

    #[test]
    fn test_tagged_records_blueprint() {
        let blueprint = SchemaSynthesizer::default()
            .synthesize_records(&tagged_records())
            .unwrap();

        assert_eq!(
            blueprint.field_keys().collect::<Vec<_>>(),
            vec!["Name", "Color", "Age"]
        );
        let name = blueprint.field("Name").unwrap();
        assert_eq!(name.constraints, vec![Constraint::Required, Constraint::Unique]);

        let json = serde_json::to_string_pretty(&blueprint).unwrap();
        assert_snapshot!(json, @r#"
        {
          "name": "Dynamically Generated Blueprint",
          "fields": [
            {
              "key": "Name",
              "name": "Name",
              "type": "string",
              "constraints": [
                {
                  "type": "required"
                },
                {
                  "type": "unique"
                }
              ],
              "config": {
                "size": "normal"
              }
            },
            {
              "key": "Color",
              "name": "Color",
              "type": "enum",
              "constraints": [],
              "config": {
                "options": [
                  {
                    "value": "Red",
                    "label": "Red"
                  },
                  {
                    "value": "Green",
                    "label": "Green"
                  }
                ]
              }
            },
            {
              "key": "Age",
              "name": "Age",
              "type": "number",
              "constraints": [],
              "config": {
                "decimalPlaces": 2
              }
            }
          ]
        }
        "#);
    }

    #[test]
    fn test_substituted_type_table() {
        let table = TypeTable::empty().with_tag("Enumeration", FieldType::String);
        let synth = SchemaSynthesizer::new(InferenceMode::Auto, table);

        let blueprint = synth.synthesize_records(&tagged_records()).unwrap();
        assert!(blueprint
            .fields
            .iter()
            .all(|f| f.field_type == FieldType::String));
    }

    #[test]
    fn test_settings_force_runtime_shape() {
        let settings = InferenceSettings {
            mode: InferenceMode::RuntimeShape,
            ..Default::default()
        };
        let blueprint = SchemaSynthesizer::from_settings(&settings)
            .synthesize_records(&tagged_records())
            .unwrap();

        // Tags are plain text when read as data
        assert!(blueprint
            .fields
            .iter()
            .all(|f| f.field_type == FieldType::String && f.config.is_some()));
    }

    #[test]
    fn test_duplicate_metadata_row_is_rejected() {
        let mut records = tagged_records();
        records.push(Record::new().with("Field Name", "Is Unique?").with("Name", "x"));

        assert!(matches!(
            SchemaSynthesizer::default().synthesize_records(&records),
            Err(SchemaInferenceError::MalformedMetadata { row: 4, .. })
        ));
    }
    #[test]
    fn test_constraint_rows_keep_data_typing() {
        let records = vec![
            Record::new()
                .with("Field Name", "Is Required?")
                .with("Name", "x")
                .with("Age", ""),
            Record::new()
                .with("Field Name", "")
                .with("Name", "Alice")
                .with("Age", 30),
        ];

        let blueprint = SchemaSynthesizer::default()
            .synthesize_records(&records)
            .unwrap();

        let age = blueprint.field("Age").unwrap();
        assert_eq!(age.field_type, FieldType::Number);
        assert!(age.constraints.is_empty());
        let name = blueprint.field("Name").unwrap();
        assert_eq!(name.field_type, FieldType::String);
        assert_eq!(name.constraints, vec![Constraint::Required]);
    }

    #[test]
    fn test_field_order_independent_of_decoding() {
        let page = serde_json::json!([
            {"values": {"Name": {"value": "Alice"}, "Age": {"value": 30}}},
            {"values": {"Name": {"value": "Bob"}, "Age": {"value": 41}}}
        ]);

        let from_value: Vec<Record> = serde_json::from_value(page.clone()).unwrap();
        let from_text: Vec<Record> = serde_json::from_str(&page.to_string()).unwrap();

        let synth = SchemaSynthesizer::default();
        let keys = |records: &[Record]| -> Vec<String> {
            synth
                .synthesize_records(records)
                .unwrap()
                .fields
                .into_iter()
                .map(|f| f.key)
                .collect()
        };
        assert_eq!(keys(&from_value), vec!["Name", "Age"]);
        assert_eq!(keys(&from_value), keys(&from_text));
    }
}
