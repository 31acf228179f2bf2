use rowmap_domain::{LabeledRow, Row, Value};
use serde_json::json;

#[test]
fn values_serialize_as_plain_scalars() {
    let row = Row::from(vec![
        Value::Null,
        Value::Bool(true),
        Value::Int(7),
        Value::Float(2.5),
        Value::Text("Rick".to_owned()),
    ]);

    let encoded = serde_json::to_value(&row).expect("row serialize");
    assert_eq!(encoded, json!([null, true, 7, 2.5, "Rick"]));

    let decoded: Row = serde_json::from_value(encoded).expect("row deserialize");
    assert_eq!(decoded, row);
}

#[test]
fn labeled_row_keeps_insertion_order_in_json() {
    let row: LabeledRow = [("Full Name", "Rick"), ("location", "Earth C-137")].into_iter().collect();

    let text = serde_json::to_string(&row).expect("labeled row serialize");
    assert_eq!(text, r#"{"Full Name":"Rick","location":"Earth C-137"}"#);

    let decoded: LabeledRow = serde_json::from_str(r#"{"z":1,"a":2}"#).expect("deserialize");
    assert_eq!(decoded.keys().collect::<Vec<_>>(), ["z", "a"]);
}
