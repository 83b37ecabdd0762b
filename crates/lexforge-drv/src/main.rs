fn main() {
    if let Err(err) = lexforge_drv::main() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
