pub mod dispatcher;
pub mod fetcher;
pub mod relay;
pub mod render;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod traits;
