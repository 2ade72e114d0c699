// Adapters layer: concrete implementations of the domain ports.

pub mod geoip;
pub mod storage;
pub mod weather;

pub use geoip::GeoIpClient;
pub use storage::LocalStorage;
pub use weather::OpenWeatherClient;
