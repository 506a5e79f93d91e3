use urlvalues::Decode;

#[derive(Default, Decode)]
struct Color(String);

fn main() {}
