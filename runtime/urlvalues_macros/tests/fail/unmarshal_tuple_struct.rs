use urlvalues::Unmarshal;

#[derive(Unmarshal)]
struct Range(u32, u32);

fn main() {}
