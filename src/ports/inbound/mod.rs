/// Inbound ports (Driving ports) - what the UI layer reads
///
/// The UI layer renders from these accessors and never sees the gateways.
pub mod repository_detail_port;

pub use repository_detail_port::RepositoryDetailPort;
