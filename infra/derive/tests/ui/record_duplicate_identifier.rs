use rowmap::Record;

#[derive(Default, Record)]
struct User {
    name: String,
    #[record(rename = "name")]
    nickname: String,
}

fn main() {}
