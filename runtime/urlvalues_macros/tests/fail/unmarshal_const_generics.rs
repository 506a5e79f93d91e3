use urlvalues::Unmarshal;

#[derive(Unmarshal)]
struct Tags<const N: usize> {
    first: String,
}

fn main() {}
