fn main() {
    if let Err(err) = orgchart::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
