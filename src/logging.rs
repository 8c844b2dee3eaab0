use env_logger::Env;

pub const LOG_ENV: &str = "AION_COORDS_LOG";

/// Install the stderr logger. Level comes from `AION_COORDS_LOG`, default `warn`.
/// Safe to call more than once.
pub fn init() {
    let _ = env_logger::Builder::from_env(Env::default().filter_or(LOG_ENV, "warn"))
        .format_timestamp(None)
        .try_init();
}
