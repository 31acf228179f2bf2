use rowmap_derive::rowmap_error;

#[rowmap_error]
pub enum DemoError {
    #[error("IO error: {0}")]
    Io(std::io::Error),
}

fn main() {}
