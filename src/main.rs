fn main() {
    if let Err(err) = csv_integrity::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
