fn main() {
    flag_drop::run();
}
