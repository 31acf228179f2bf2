use rowmap::Record;

#[derive(Default, Record)]
struct Pair(String, String);

fn main() {}
