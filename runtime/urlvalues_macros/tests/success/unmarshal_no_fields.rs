use urlvalues::{Unmarshal, UnmarshalError, UrlValues, unmarshal};

#[derive(Default, Unmarshal)]
pub struct Empty {}

#[derive(Default, Unmarshal)]
pub struct AllSkipped {
    #[urlvalue("-")]
    pub skipped: String,
}

fn main() {
    let err = unmarshal(UrlValues::new(), &mut Empty::default()).unwrap_err();
    assert!(matches!(err, UnmarshalError::NoFields));
    let err = unmarshal(UrlValues::new(), &mut AllSkipped::default()).unwrap_err();
    assert!(matches!(err, UnmarshalError::NoFields));
}
