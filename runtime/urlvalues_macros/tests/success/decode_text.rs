use urlvalues::{BoxError, Decode, TextDecode, Unmarshal, UrlValues, unmarshal};

#[derive(Default, Decode)]
#[urlvalue(text)]
pub struct Shouting(String);

impl TextDecode for Shouting {
    fn decode_text(&mut self, text: &[u8]) -> Result<(), BoxError> {
        self.0 = std::str::from_utf8(text)?.to_uppercase();
        Ok(())
    }
}

#[derive(Default, Unmarshal)]
pub struct Target {
    pub greeting: Shouting,
    pub greetings: Vec<Shouting>,
}

fn main() {
    let mut target = Target::default();
    unmarshal(UrlValues::parse("greeting=hi&greetings=a;b"), &mut target).unwrap();
    assert_eq!(target.greeting.0, "HI");
    assert_eq!(target.greetings.len(), 2);
    assert_eq!(target.greetings[1].0, "B");
}
