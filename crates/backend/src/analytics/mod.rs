pub mod live;
pub mod mock;
pub mod normalize;
pub mod provider;
pub mod repository;
pub mod rollup;
