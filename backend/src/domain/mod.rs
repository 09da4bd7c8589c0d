//! Domain primitives, aggregates and services.
//!
//! Purpose: define the value objects, records and use cases of the shopping
//! list backend without depending on any transport or storage. Inbound
//! adapters call the services; outbound adapters implement the ports.
//!
//! Public surface:
//! - Error, ErrorCode: transport-agnostic failure payload.
//! - ResponseDto, ResponseStatus: the uniform response envelope.
//! - Records: User, Group, UserGroup, Product, ProductShop, Shop,
//!   ListOrders, Order, Notification, Share.
//! - Services: one per aggregate, generic over their ports.

pub mod error;
pub mod paginator;
pub mod ports;
pub mod response;
pub mod validation;
pub mod value_objects;

mod group;
mod list_orders;
mod notification;
mod order;
mod product;
mod share;
mod shop;
mod user;

mod group_service;
mod list_orders_service;
mod notification_service;
mod order_service;
mod product_service;
mod service_support;
mod share_service;
mod shop_service;
mod user_service;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::group::{Group, GroupRole, UserGroup};
pub use self::group_service::{CreateGroupRequest, GroupService};
pub use self::list_orders::ListOrders;
pub use self::list_orders_service::{CreateListOrdersRequest, ListOrdersService};
pub use self::notification::Notification;
pub use self::notification_service::{CreateNotificationRequest, NotificationService};
pub use self::order::Order;
pub use self::order_service::{CreateOrderRequest, OrderService, OrderStores};
pub use self::product::{Product, ProductShop};
pub use self::product_service::{CreateProductRequest, ProductService};
pub use self::response::{ResponseDto, ResponseStatus};
pub use self::share::Share;
pub use self::share_service::{DEFAULT_SHARE_LIFETIME, ShareService};
pub use self::shop::Shop;
pub use self::shop_service::{CreateShopRequest, ShopService};
pub use self::user::User;
pub use self::user_service::{SignUpRequest, UserService};

/// Convenient result alias for domain operations.
///
/// # Examples
/// ```
/// use basket::domain::{DomainResult, Error};
///
/// fn lookup() -> DomainResult<()> {
///     Err(Error::not_found("missing"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type DomainResult<T> = Result<T, Error>;
