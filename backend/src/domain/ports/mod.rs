//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod group_repository;
mod list_orders_repository;
mod notification_repository;
mod order_repository;
mod password_hasher;
mod product_repository;
mod repository_error;
mod share_repository;
mod shop_repository;
mod user_repository;

pub use group_repository::GroupRepository;
#[cfg(test)]
pub use group_repository::MockGroupRepository;
pub use list_orders_repository::ListOrdersRepository;
#[cfg(test)]
pub use list_orders_repository::MockListOrdersRepository;
#[cfg(test)]
pub use notification_repository::MockNotificationRepository;
pub use notification_repository::NotificationRepository;
#[cfg(test)]
pub use order_repository::MockOrderRepository;
pub use order_repository::OrderRepository;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use product_repository::MockProductRepository;
pub use product_repository::ProductRepository;
pub use repository_error::RepositoryError;
#[cfg(test)]
pub use share_repository::MockShareRepository;
pub use share_repository::ShareRepository;
#[cfg(test)]
pub use shop_repository::MockShopRepository;
pub use shop_repository::ShopRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
mod tests;
