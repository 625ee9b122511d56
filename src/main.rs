fn main() {
    if let Err(e) = hostsfile::cli::run() {
        eprintln!("Error: {e:#}");
        std::process::exit(hostsfile::cli::exit_code(&e));
    }
}
