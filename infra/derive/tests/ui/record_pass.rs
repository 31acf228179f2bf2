use rowmap::{Record, Registry};

#[derive(Debug, Default, Record)]
struct User {
    #[record(label = "Full Name")]
    name: String,
    #[record(rename = "planet")]
    location: String,
    #[record(skip)]
    visits: Vec<String>,
}

fn main() {
    let registry = Registry::<User>::from_record().expect("registry");
    assert_eq!(registry.identifiers().collect::<Vec<_>>(), ["name", "planet"]);
    assert_eq!(registry.label_for("name"), Some("Full Name"));
    assert!(User::accessor("visits").is_none());
}
