/// Install a logger for the current platform.
///
/// Natively this is `env_logger` (configured through `RUST_LOG`), in the
/// browser `console_log` at `Info` level. Calling it more than once is harmless.
pub fn init_logging() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            println!("Warning: Could not initialize logger: {}", e);
        };
    }

    #[cfg(target_arch = "wasm32")]
    {
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Could not initialize logger: {}", e).into());
        }
    }
}
