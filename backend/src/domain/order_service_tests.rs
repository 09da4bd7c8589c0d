//! Tests for the order service.

use std::sync::Arc;

use rstest::{fixture, rstest};
use serde_json::json;

use super::*;
use crate::domain::ports::{
    MockGroupRepository, MockListOrdersRepository, MockOrderRepository, MockProductRepository,
    MockShopRepository,
};
use crate::domain::test_fixtures::{fixture_clock, fixture_timestamp, membership};
use crate::domain::value_objects::{NameWithSpaces, Path};
use crate::domain::{ErrorCode, GroupRole, ListOrders, Product};

type Service = OrderService<
    MockOrderRepository,
    MockListOrdersRepository,
    MockProductRepository,
    MockShopRepository,
    MockGroupRepository,
>;

#[derive(Default)]
struct Mocks {
    orders: MockOrderRepository,
    lists: MockListOrdersRepository,
    products: MockProductRepository,
    shops: MockShopRepository,
    groups: MockGroupRepository,
}

impl Mocks {
    fn member(mut self, group_id: &Identifier, user_id: &Identifier) -> Self {
        let member = membership(group_id, user_id, GroupRole::User);
        self.groups
            .expect_find_membership()
            .returning(move |_, _| Ok(Some(member.clone())));
        self
    }

    fn with_list(mut self, exists: bool) -> Self {
        self.lists.expect_find_by_id().returning(move |group_id, id| {
            Ok(exists.then(|| ListOrders {
                id: id.clone(),
                group_id: group_id.clone(),
                user_id: Identifier::random(),
                name: NameWithSpaces::new("Weekend"),
                description: Description::null(),
                date_to_buy: None,
                created_on: fixture_timestamp(),
            }))
        });
        self
    }

    fn with_product(mut self, exists: bool) -> Self {
        self.products.expect_find_by_id().returning(move |group_id, id| {
            Ok(exists.then(|| Product {
                id: id.clone(),
                group_id: group_id.clone(),
                name: NameWithSpaces::new("Bread"),
                description: Description::null(),
                image: Path::null(),
                created_on: fixture_timestamp(),
            }))
        });
        self
    }

    fn into_service(self) -> Service {
        OrderService::new(
            OrderStores {
                orders: Arc::new(self.orders),
                lists: Arc::new(self.lists),
                products: Arc::new(self.products),
                shops: Arc::new(self.shops),
                groups: Arc::new(self.groups),
            },
            fixture_clock(),
        )
    }
}

#[fixture]
fn request() -> CreateOrderRequest {
    CreateOrderRequest {
        group_id: Identifier::random(),
        user_id: Identifier::random(),
        list_orders_id: Identifier::random(),
        product_id: Identifier::random(),
        shop_id: IdentifierNullable::null(),
        description: Description::new("Wholemeal"),
        amount: Amount::new(2.0),
    }
}

fn stored_order(request: &CreateOrderRequest, bought: bool) -> Order {
    Order {
        id: Identifier::random(),
        group_id: request.group_id.clone(),
        list_orders_id: request.list_orders_id.clone(),
        product_id: request.product_id.clone(),
        shop_id: IdentifierNullable::null(),
        user_id: request.user_id.clone(),
        description: Description::null(),
        amount: Amount::null(),
        bought,
        created_on: fixture_timestamp(),
    }
}

#[rstest]
#[tokio::test]
async fn create_places_unbought_order(request: CreateOrderRequest) {
    let mut mocks = Mocks::default()
        .member(&request.group_id, &request.user_id)
        .with_list(true)
        .with_product(true);
    mocks.orders.expect_save().times(1).return_once(|_| Ok(()));

    let order = mocks
        .into_service()
        .create(request)
        .await
        .expect("order created");
    assert!(!order.bought);
    assert_eq!(order.amount.value(), Some(2.0));
}

#[rstest]
#[case::missing_list(false, true, "list_orders_not_found")]
#[case::missing_product(true, false, "product_not_found")]
#[tokio::test]
async fn create_requires_group_resources(
    request: CreateOrderRequest,
    #[case] list: bool,
    #[case] product: bool,
    #[case] key: &str,
) {
    let mut mocks = Mocks::default()
        .member(&request.group_id, &request.user_id)
        .with_list(list)
        .with_product(product);
    mocks.orders.expect_save().never();

    let error = mocks
        .into_service()
        .create(request)
        .await
        .expect_err("resource missing");
    assert_eq!(error.code(), ErrorCode::NotFound);
    assert!(error.errors().contains_key(key));
}

#[rstest]
#[tokio::test]
async fn create_rejects_empty_shop_reference(mut request: CreateOrderRequest) {
    request.shop_id = IdentifierNullable::new("");
    let mut mocks = Mocks::default();
    mocks.shops.expect_find_by_id().never();
    mocks.orders.expect_save().never();

    let error = mocks
        .into_service()
        .create(request)
        .await
        .expect_err("empty shop reference");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.errors()["shop_id"], json!(["string_too_short"]));
}

#[rstest]
#[tokio::test]
async fn create_checks_optional_shop(mut request: CreateOrderRequest) {
    request.shop_id = IdentifierNullable::from(Identifier::random());
    let mut mocks = Mocks::default()
        .member(&request.group_id, &request.user_id)
        .with_list(true)
        .with_product(true);
    mocks.shops.expect_find_by_id().return_once(|_, _| Ok(None));

    let error = mocks
        .into_service()
        .create(request)
        .await
        .expect_err("shop missing");
    assert!(error.errors().contains_key("shop_not_found"));
}

#[rstest]
#[tokio::test]
async fn create_rejects_negative_amount(mut request: CreateOrderRequest) {
    request.amount = Amount::new(-3.0);

    let error = Mocks::default()
        .into_service()
        .create(request)
        .await
        .expect_err("invalid amount");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.errors()["amount"], serde_json::json!(["positive_or_zero"]));
}

#[rstest]
#[tokio::test]
async fn set_bought_updates_order(request: CreateOrderRequest) {
    let order = stored_order(&request, false);
    let order_id = order.id.clone();
    let mut mocks = Mocks::default().member(&request.group_id, &request.user_id);
    mocks
        .orders
        .expect_find_by_id()
        .return_once(move |_, _| Ok(Some(order)));
    mocks
        .orders
        .expect_update()
        .times(1)
        .withf(|order| order.bought)
        .return_once(|_| Ok(()));

    let updated = mocks
        .into_service()
        .set_bought(&request.group_id, &request.user_id, &order_id, true)
        .await
        .expect("order updated");
    assert!(updated.bought);
}

#[rstest]
#[tokio::test]
async fn set_bought_is_a_no_op_when_unchanged(request: CreateOrderRequest) {
    let order = stored_order(&request, true);
    let order_id = order.id.clone();
    let mut mocks = Mocks::default().member(&request.group_id, &request.user_id);
    mocks
        .orders
        .expect_find_by_id()
        .return_once(move |_, _| Ok(Some(order)));
    mocks.orders.expect_update().never();

    mocks
        .into_service()
        .set_bought(&request.group_id, &request.user_id, &order_id, true)
        .await
        .expect("nothing to change");
}

#[rstest]
#[tokio::test]
async fn list_for_list_orders_requires_list(request: CreateOrderRequest) {
    let mut mocks = Mocks::default()
        .member(&request.group_id, &request.user_id)
        .with_list(false);
    mocks.orders.expect_list_for_list_orders().never();

    let error = mocks
        .into_service()
        .list_for_list_orders(
            &request.group_id,
            &request.user_id,
            &request.list_orders_id,
            PageRequest::default(),
        )
        .await
        .expect_err("list missing");
    assert!(error.errors().contains_key("list_orders_not_found"));
}
