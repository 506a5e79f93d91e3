use urlvalues::{BinaryDecode, BoxError, Decode, TextDecode, Unmarshal, UrlValues, unmarshal};

#[derive(Default, Decode)]
#[urlvalue(binary)]
pub struct Length(usize);

impl BinaryDecode for Length {
    fn decode_binary(&mut self, data: &[u8]) -> Result<(), BoxError> {
        self.0 = data.len();
        Ok(())
    }
}

/// Text decoding wins when both are available.
#[derive(Default, Decode)]
#[urlvalue(text, binary)]
pub struct Both(&'static str);

impl TextDecode for Both {
    fn decode_text(&mut self, _text: &[u8]) -> Result<(), BoxError> {
        self.0 = "text";
        Ok(())
    }
}

impl BinaryDecode for Both {
    fn decode_binary(&mut self, _data: &[u8]) -> Result<(), BoxError> {
        self.0 = "binary";
        Ok(())
    }
}

#[derive(Default, Unmarshal)]
pub struct Target {
    pub length: Length,
    pub both: Both,
}

fn main() {
    let mut target = Target::default();
    unmarshal(UrlValues::parse("length=four&both=x"), &mut target).unwrap();
    assert_eq!(target.length.0, 4);
    assert_eq!(target.both.0, "text");
}
