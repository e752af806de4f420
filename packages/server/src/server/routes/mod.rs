pub mod bot;
pub mod health;

pub use bot::{analyze_image_handler, verify_certificate_handler};
pub use health::health_handler;
