use urlvalues::Unmarshal;

#[derive(Unmarshal)]
struct Search<'a> {
    query: &'a str,
}

fn main() {}
