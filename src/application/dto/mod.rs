/// Data Transfer Objects for application layer
///
/// DTOs carry requests and format choices between the adapters and the
/// use case, keeping the domain layer isolated.
mod detail_request;
mod output_format;

pub use detail_request::DetailRequest;
pub use output_format::OutputFormat;
