pub mod request;
pub mod response;

pub use request::ChatRequestDto;
pub use response::HealthResponse;
