use crate::core::format::FitFormat;
use crate::domain::model::{CategoryId, Fit, Rendered};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Name → catalog category. A miss is `None`, never an error.
pub trait CategoryLookup: Send + Sync {
    fn category_of(&self, name: &str) -> Option<CategoryId>;
}

impl<T: CategoryLookup + ?Sized> CategoryLookup for &T {
    fn category_of(&self, name: &str) -> Option<CategoryId> {
        (**self).category_of(name)
    }
}

impl<T: CategoryLookup + ?Sized> CategoryLookup for Box<T> {
    fn category_of(&self, name: &str) -> Option<CategoryId> {
        (**self).category_of(name)
    }
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    /// `None` means the caller prints the result.
    fn output_path(&self) -> Option<&str>;
    /// `None` means detect from the input.
    fn input_format(&self) -> Option<FitFormat>;
    fn output_format(&self) -> FitFormat;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Fit>;
    async fn transform(&self, fit: Fit) -> Result<Rendered>;
    async fn load(&self, rendered: &Rendered) -> Result<Option<String>>;
}
