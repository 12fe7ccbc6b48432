/// Builds a `Vec<Property>` from `name => value` pairs.
///
/// Values go through `Into<PropertyValue>`, so Rust literals, strings, byte
/// vectors and objects can be used directly.
///
/// # Examples
///
/// ```rust
/// use dfm::{properties, Object, PropertyValue};
///
/// let mut button = Object::new("Button1", "TButton");
/// button.properties = properties! {
///     "Left" => 8,
///     "Caption" => "OK",
///     "Default" => true,
///     "Font.Color" => PropertyValue::identifier("clRed"),
/// };
/// assert_eq!(button.get("Left").and_then(PropertyValue::as_i64), Some(8));
/// ```
#[macro_export]
macro_rules! properties {
    () => {
        ::std::vec::Vec::<$crate::Property>::new()
    };

    ($($name:expr => $value:expr),+ $(,)?) => {
        vec![$($crate::Property::new($name, $value)),+]
    };
}
