#[cfg(test)]
mod tests {
    use serde_json::json;
    use workbook_agent::inference::{
        extract_constraints, extract_enum_options, FieldTypeInferrer, MetadataKind, TypeTable,
        FIELD_NAME_COLUMN,
    };
    use workbook_agent::model::{Constraint, FieldType, Record};

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_required_and_unique_rows() {
        let records = vec![
            Record::new()
                .with(FIELD_NAME_COLUMN, "Is Required?")
                .with("A", "x")
                .with("B", "")
                .with("C", "x")
                .with("D", ""),
            Record::new()
                .with(FIELD_NAME_COLUMN, "Is Unique?")
                .with("A", "")
                .with("B", "x")
                .with("C", "")
                .with("D", ""),
            Record::new()
                .with(FIELD_NAME_COLUMN, "Type")
                .with("A", "String")
                .with("B", "String")
                .with("C", "Int")
                .with("D", "Boolean"),
        ];

        let constraints = extract_constraints(&headers(&["A", "B", "C", "D"]), &records);

        assert_eq!(constraints.len(), 4);
        assert_eq!(constraints["A"], vec![Constraint::Required]);
        assert_eq!(constraints["B"], vec![Constraint::Unique]);
        assert_eq!(constraints["C"], vec![Constraint::Required]);
        assert!(constraints["D"].is_empty());
    }

    #[test]
    fn test_enumerations_row() {
        let records = vec![Record::new()
            .with(FIELD_NAME_COLUMN, "Enumerations")
            .with("X", "Red, Green , Blue")];

        assert_eq!(
            extract_enum_options("X", &records),
            vec!["Red", "Green", "Blue"]
        );
    }

    #[test]
    fn test_sentinels() {
        for kind in MetadataKind::ALL {
            assert_eq!(MetadataKind::from_sentinel(kind.sentinel()), Some(kind));
        }
        assert_eq!(MetadataKind::from_sentinel("is required?"), None);
    }

    #[test]
    fn test_recognized_tags_and_fallback() {
        let inferrer = FieldTypeInferrer::TagMapping(TypeTable::default());
        let expected = [
            ("String", FieldType::String),
            ("Enumeration", FieldType::Enum),
            ("Int", FieldType::Number),
            ("Float", FieldType::Number),
            ("Boolean", FieldType::Boolean),
        ];
        for (tag, ty) in expected {
            assert_eq!(inferrer.infer(&json!(tag)), ty, "tag {}", tag);
        }

        for other in [json!("Date"), json!(""), json!(1), json!(null), json!([])] {
            assert_eq!(inferrer.infer(&other), FieldType::String);
        }
    }

    #[test]
    fn test_records_decode_in_column_order() {
        let record: Record = serde_json::from_value(json!({
            "id": "us_rc_1",
            "values": {
                "Zeta": {"value": "z"},
                "Alpha": {"value": 1, "valid": true},
                "Field Name": {"value": "Type"}
            }
        }))
        .unwrap();

        assert_eq!(
            record.values.headers().collect::<Vec<_>>(),
            vec!["Zeta", "Alpha", "Field Name"]
        );
        assert_eq!(MetadataKind::of(&record), None);
    }
}
