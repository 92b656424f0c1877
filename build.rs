fn main() {
    // Emit ESP-IDF link arguments only when building for the device.
    // Host builds (tests, simulation) skip the sysenv probe entirely.
    if std::env::var_os("CARGO_FEATURE_ESPIDF").is_some() {
        embuild::espidf::sysenv::output();
    }
}
