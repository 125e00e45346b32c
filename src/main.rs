fn main() {
    if let Err(e) = artvue_lib::run() {
        log::error!("Failed to start ArtVue: {}", e);
        eprintln!("artvue: {}", e);
        std::process::exit(1);
    }
}
