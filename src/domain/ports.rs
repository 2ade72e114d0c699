use crate::core::diagnostics::Diagnostics;
use crate::domain::model::{Histogram, IpAddress, IpSet, Locale, Temperature};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Maps an address to coordinates. Returning the (0, 0) sentinel is not an
/// error here; callers decide what to do with it.
#[async_trait]
pub trait LocaleResolver: Send + Sync {
    async fn resolve_locale(
        &self,
        ip: &IpAddress,
        diagnostics: &mut Diagnostics,
    ) -> Result<Locale>;
}

#[async_trait]
pub trait ForecastResolver: Send + Sync {
    /// Tomorrow's forecast high, in degrees Fahrenheit.
    async fn tomorrows_high(
        &self,
        locale: Locale,
        diagnostics: &mut Diagnostics,
    ) -> Result<Temperature>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self, diagnostics: &mut Diagnostics) -> Result<IpSet>;
    async fn transform(&self, ips: IpSet, diagnostics: &mut Diagnostics) -> Result<Histogram>;
    async fn load(&self, histogram: &Histogram) -> Result<String>;
}
