fn main() {
    hostsnap::run_cli();
}
