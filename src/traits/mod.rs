pub mod transport;

pub use transport::{ApplianceTransport, FileUpload};

#[cfg(test)]
pub use transport::MockApplianceTransport;
