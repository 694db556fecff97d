fn main() {
    if let Err(e) = typescope_cli::run() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
