/// Adapters layer - Infrastructure implementations
///
/// Concrete implementations of the outbound ports: the registry API client,
/// the build poller, the vulnerability tally, formatters and console output.
pub mod outbound;
