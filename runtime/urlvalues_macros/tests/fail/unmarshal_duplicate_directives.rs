use urlvalues::Unmarshal;

#[derive(Unmarshal)]
struct Filter {
    #[urlvalue("status")]
    #[urlvalue(",default:open")]
    status: String,
}

fn main() {}
