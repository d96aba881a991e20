/// Ports module defining interfaces for hexagonal architecture
///
/// Inbound ports describe what the surrounding UI layer reads from the
/// detail controller; outbound ports describe the registry services and
/// collaborators the controller drives.
pub mod inbound;
pub mod outbound;
