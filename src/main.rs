fn main() {
    if let Err(err) = tunables::cli::run() {
        eprintln!("tunables: {}", err);
        std::process::exit(1);
    }
}
