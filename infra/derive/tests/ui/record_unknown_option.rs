use rowmap::Record;

#[derive(Default, Record)]
struct User {
    #[record(title = "Name")]
    name: String,
}

fn main() {}
