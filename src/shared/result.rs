/// Result alias used by ports, use cases and adapters.
/// Domain failures are `DetailError` values wrapped into `anyhow::Error`.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
