//! `tc`: the short command name used throughout the help text.

fn main() {
    if let Err(err) = text_clipper::entry() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
