mod builder;
mod container;
pub mod defaults;
mod injectable;
mod key;

pub use builder::ContainerBuilder;
pub use container::Container;
pub use defaults::default_of;
pub use injectable::Injectable;
pub use key::DependencyKey;
