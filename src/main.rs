/// Binary entrypoint for the `yanggang` executable.
///
/// Keeps the binary thin: all logic lives in the `yanggang_lib` crate so unit
/// tests can import library functions directly.
fn main() {
    yanggang_lib::run();
}
