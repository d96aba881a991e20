/// Network adapters for the registry REST API
mod registry_client;

pub use registry_client::RegistryApiClient;
