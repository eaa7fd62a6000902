// Keep stdout for command results; all diagnostics go to stderr
fn main() {
    std::process::exit(mcpskill_lib::run());
}
