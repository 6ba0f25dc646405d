fn main() {
    if let Err(err) = text_clipper::entry() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
