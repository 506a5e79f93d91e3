use urlvalues::{Unmarshal, UrlValues, unmarshal};

#[derive(Default, Unmarshal)]
pub struct Target {
    #[urlvalue("aString,default:banana")]
    pub a_string: String,
    #[urlvalue("-")]
    pub not_decodable: std::cell::Cell<()>,
    #[urlvalue("-,")]
    pub dash: String,
    pub r#type: String,
    untagged: u8,
}

fn main() {
    let mut target = Target::default();
    unmarshal(UrlValues::parse("-=dash&type=raw&untagged=7"), &mut target).unwrap();
    assert_eq!(target.a_string, "banana");
    assert_eq!(target.dash, "dash");
    assert_eq!(target.r#type, "raw");
    assert_eq!(target.untagged, 7);
}
