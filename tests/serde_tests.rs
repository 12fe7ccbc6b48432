use dfm::{from_str, Object, PropertyValue};

const FORM: &str = "object Form1: TForm1 [2]
  Caption = 'Hi'#10
  Anchors = [akLeft]
  Data = {0102}
  Panels = <
    item
      Width = 50
    end>
  object TMenuItem
    Checked = True
  end
end";

#[test]
fn test_json_round_trip() {
    let form = from_str(FORM).unwrap();
    let json = serde_json::to_string(&form).unwrap();
    let back: Object = serde_json::from_str(&json).unwrap();
    assert_eq!(back, form);
}

#[test]
fn test_json_shape() {
    let form = from_str(FORM).unwrap();
    let json = serde_json::to_value(&form).unwrap();

    assert_eq!(json["name"], "Form1");
    assert_eq!(json["type"], "TForm1");
    assert_eq!(json["kind"], "Plain");
    assert_eq!(json["index"], 2);
    assert_eq!(json["properties"][0]["name"], "Caption");
    assert_eq!(json["properties"][0]["value"]["String"], "Hi\n");
    assert_eq!(
        json["properties"][1]["value"]["Set"][0]["Identifier"],
        "akLeft"
    );
    assert_eq!(json["properties"][2]["value"]["Bytes"], serde_json::json!([1, 2]));
    assert_eq!(
        json["properties"][4]["value"]["Object"]["type"],
        "TMenuItem"
    );
}

#[test]
fn test_value_from_json() {
    let value: PropertyValue = serde_json::from_str(r#"{"Tuple":[{"Int":800},{"Float":0.5}]}"#).unwrap();
    assert_eq!(
        value,
        PropertyValue::Tuple(vec![PropertyValue::Int(800), PropertyValue::Float(0.5)])
    );
    assert_eq!(value.to_string(), "(\r\n  800\r\n  0.500000000000000000)");
}
