//! rbundle CLI binary
//!
//! Minimal entrypoint. All logic is in the library; main.rs only invokes
//! cli::run().

fn main() {
    // cli::run() prints all output including errors; main only maps to the
    // process exit status.
    if let Err(code) = rbundle::cli::run() {
        std::process::exit(code.as_i32());
    }
}
