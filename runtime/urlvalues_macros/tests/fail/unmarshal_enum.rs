use urlvalues::Unmarshal;

#[derive(Unmarshal)]
enum Mode {
    Fast,
    Slow,
}

fn main() {}
