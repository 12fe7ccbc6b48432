use dfm::{from_str, properties, to_string, Object, Property, PropertyValue};

#[test]
fn test_properties_macro_empty() {
    let props: Vec<Property> = properties!();
    assert!(props.is_empty());
}

#[test]
fn test_properties_macro_scalars() {
    let props = properties! {
        "Left" => 8,
        "Top" => -3,
        "Scale" => 1.25,
        "Visible" => false,
        "Caption" => "OK",
    };
    assert_eq!(
        props,
        vec![
            Property::new("Left", PropertyValue::Int(8)),
            Property::new("Top", PropertyValue::Int(-3)),
            Property::new("Scale", PropertyValue::Float(1.25)),
            Property::new("Visible", PropertyValue::Bool(false)),
            Property::new("Caption", PropertyValue::String("OK".to_string())),
        ]
    );
}

#[test]
fn test_properties_macro_trailing_comma_optional() {
    assert_eq!(properties! { "A" => 1 }, properties! { "A" => 1, });
}

#[test]
fn test_properties_macro_builds_printable_form() {
    let mut form = Object::new("Form1", "TForm1");
    form.properties = properties! {
        "Caption" => "Main",
        "Anchors" => PropertyValue::Set(vec![
            PropertyValue::identifier("akLeft"),
            PropertyValue::identifier("akTop"),
        ]),
        "Button1" => Object::new("Button1", "TButton"),
        "Tag" => 3,
    };

    let code = to_string(&form);
    assert_eq!(
        code,
        "object Form1: TForm1\r\n  Caption = 'Main'\r\n  Anchors = [akLeft, akTop]\r\n  object Button1: TButton\r\n  end\r\n  Tag = 3\r\nend\r\n"
    );
    assert_eq!(from_str(&code).unwrap(), form);
}

#[test]
fn test_properties_macro_in_items() {
    let items = PropertyValue::Items(vec![
        properties! { "Width" => 50 },
        properties! { "Text" => "Ready", "Width" => 100 },
    ]);
    assert_eq!(
        items.to_string(),
        "<\r\n  item\r\n    Width = 50\r\n  end\r\n  item\r\n    Text = 'Ready'\r\n    Width = 100\r\n  end>"
    );
}
