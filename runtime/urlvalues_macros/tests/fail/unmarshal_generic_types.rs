use urlvalues::Unmarshal;

#[derive(Unmarshal)]
struct Page<T> {
    items: Vec<T>,
}

fn main() {}
