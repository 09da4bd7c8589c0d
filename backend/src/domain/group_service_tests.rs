//! Tests for the group service.

use std::sync::Arc;

use pagination::Pagination;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::{MockGroupRepository, MockUserRepository};
use crate::domain::test_fixtures::{fixture_clock, fixture_timestamp, membership};
use crate::domain::value_objects::{Email, Language, NameWithSpaces, Roles};
use crate::domain::User;

type Service = GroupService<MockGroupRepository, MockUserRepository>;

fn make_service(groups: MockGroupRepository, users: MockUserRepository) -> Service {
    GroupService::new(Arc::new(groups), Arc::new(users), fixture_clock())
}

#[fixture]
fn create_request() -> CreateGroupRequest {
    CreateGroupRequest {
        user_id: Identifier::random(),
        name: Name::new("Flatmates"),
        description: Description::new("Shared flat shopping"),
        image: Path::null(),
        group_type: GroupType::new(GroupType::GROUP),
    }
}

fn shared_group(id: &Identifier) -> Group {
    Group {
        id: id.clone(),
        name: Name::new("Flatmates"),
        description: Description::null(),
        image: Path::null(),
        group_type: GroupType::new(GroupType::GROUP),
        created_on: fixture_timestamp(),
    }
}

fn user(id: &Identifier) -> User {
    User {
        id: id.clone(),
        email: Email::new("grace@example.com"),
        password: "hash".to_owned(),
        name: NameWithSpaces::new("Grace"),
        roles: Roles::new([Roles::USER]),
        language: Language::new("en"),
        image: Path::null(),
        created_on: fixture_timestamp(),
    }
}

#[rstest]
#[tokio::test]
async fn create_makes_creator_admin(create_request: CreateGroupRequest) {
    let creator_id = create_request.user_id.clone();
    let mut groups = MockGroupRepository::new();
    groups.expect_find_by_name().times(1).return_once(|_| Ok(None));
    groups
        .expect_save()
        .times(1)
        .withf(move |group, creator| {
            creator.group_id == group.id && creator.user_id == creator_id && creator.is_admin()
        })
        .return_once(|_, _| Ok(()));

    let group = make_service(groups, MockUserRepository::new())
        .create(create_request)
        .await
        .expect("group created");
    assert_eq!(group.name.value(), "Flatmates");
    assert_eq!(group.created_on, fixture_timestamp());
}

#[rstest]
#[tokio::test]
async fn create_rejects_repeated_group_name(create_request: CreateGroupRequest) {
    let existing = shared_group(&Identifier::random());
    let mut groups = MockGroupRepository::new();
    groups
        .expect_find_by_name()
        .times(1)
        .return_once(move |_| Ok(Some(existing)));

    let error = make_service(groups, MockUserRepository::new())
        .create(create_request)
        .await
        .expect_err("name repeated");
    assert_eq!(error.code(), ErrorCode::Conflict);
    assert!(error.errors().contains_key("group_name_repeated"));
}

#[rstest]
#[tokio::test]
async fn personal_groups_skip_the_name_check(mut create_request: CreateGroupRequest) {
    create_request.group_type = GroupType::new(GroupType::USER);
    let mut groups = MockGroupRepository::new();
    groups.expect_find_by_name().never();
    groups.expect_save().times(1).return_once(|_, _| Ok(()));

    make_service(groups, MockUserRepository::new())
        .create(create_request)
        .await
        .expect("personal group created");
}

#[rstest]
#[tokio::test]
async fn create_reports_every_invalid_field(mut create_request: CreateGroupRequest) {
    create_request.name = Name::new("has space");
    create_request.group_type = GroupType::new("TYPE_FAMILY");

    let error = make_service(MockGroupRepository::new(), MockUserRepository::new())
        .create(create_request)
        .await
        .expect_err("invalid request");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.errors()["name"], serde_json::json!(["alphanumeric"]));
    assert_eq!(error.errors()["type"], serde_json::json!(["choice_not_such"]));
}

#[tokio::test]
async fn users_requires_membership() {
    let mut groups = MockGroupRepository::new();
    groups.expect_find_membership().times(1).return_once(|_, _| Ok(None));
    groups.expect_list_members().never();

    let error = make_service(groups, MockUserRepository::new())
        .users(&Identifier::random(), &Identifier::random(), PageRequest::default())
        .await
        .expect_err("outsider");
    assert_eq!(error.code(), ErrorCode::Forbidden);
    assert!(error.errors().contains_key("permissions"));
}

#[tokio::test]
async fn users_returns_requested_page() {
    let group_id = Identifier::random();
    let member_id = Identifier::random();
    let member = membership(&group_id, &member_id, GroupRole::User);
    let listed = member.clone();
    let mut groups = MockGroupRepository::new();
    groups
        .expect_find_membership()
        .times(1)
        .return_once(move |_, _| Ok(Some(member)));
    groups
        .expect_list_members()
        .times(1)
        .return_once(move |_, request| Ok(Page::new(vec![listed], Pagination::new(request, 11))));

    let request = PageRequest::new(2, 10).expect("valid request");
    let page = make_service(groups, MockUserRepository::new())
        .users(&group_id, &member_id, request)
        .await
        .expect("members listed");
    assert_eq!(page.items().len(), 1);
    assert!(page.pagination().has_previous());
    assert!(!page.pagination().has_next());
}

#[tokio::test]
async fn add_user_requires_admin() {
    let group_id = Identifier::random();
    let requester = Identifier::random();
    let group = shared_group(&group_id);
    let member = membership(&group_id, &requester, GroupRole::User);
    let mut groups = MockGroupRepository::new();
    groups.expect_find_by_id().return_once(move |_| Ok(Some(group)));
    groups
        .expect_find_membership()
        .return_once(move |_, _| Ok(Some(member)));
    groups.expect_save_membership().never();

    let error = make_service(groups, MockUserRepository::new())
        .add_user(&group_id, &requester, &Identifier::random(), GroupRole::User)
        .await
        .expect_err("not admin");
    assert!(error.errors().contains_key("permissions"));
}

#[tokio::test]
async fn add_user_saves_membership() {
    let group_id = Identifier::random();
    let admin_id = Identifier::random();
    let new_user = Identifier::random();
    let group = shared_group(&group_id);
    let admin = membership(&group_id, &admin_id, GroupRole::Admin);
    let stored = user(&new_user);
    let mut groups = MockGroupRepository::new();
    groups.expect_find_by_id().return_once(move |_| Ok(Some(group)));
    groups
        .expect_find_membership()
        .return_once(move |_, _| Ok(Some(admin)));
    groups.expect_save_membership().times(1).return_once(|_| Ok(()));
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().return_once(move |_| Ok(Some(stored)));

    let added = make_service(groups, users)
        .add_user(&group_id, &admin_id, &new_user, GroupRole::User)
        .await
        .expect("user added");
    assert_eq!(added.user_id, new_user);
    assert!(!added.is_admin());
}

#[tokio::test]
async fn add_user_reports_existing_member() {
    let group_id = Identifier::random();
    let admin_id = Identifier::random();
    let new_user = Identifier::random();
    let group = shared_group(&group_id);
    let admin = membership(&group_id, &admin_id, GroupRole::Admin);
    let stored = user(&new_user);
    let mut groups = MockGroupRepository::new();
    groups.expect_find_by_id().return_once(move |_| Ok(Some(group)));
    groups
        .expect_find_membership()
        .return_once(move |_, _| Ok(Some(admin)));
    groups
        .expect_save_membership()
        .return_once(|_| Err(RepositoryError::duplicate("membership")));
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().return_once(move |_| Ok(Some(stored)));

    let error = make_service(groups, users)
        .add_user(&group_id, &admin_id, &new_user, GroupRole::User)
        .await
        .expect_err("already a member");
    assert!(error.errors().contains_key("group_user_already_exists"));
}

#[tokio::test]
async fn last_admin_cannot_leave() {
    let group_id = Identifier::random();
    let admin_id = Identifier::random();
    let admin = membership(&group_id, &admin_id, GroupRole::Admin);
    let mut groups = MockGroupRepository::new();
    groups
        .expect_find_membership()
        .times(2)
        .returning(move |_, _| Ok(Some(admin.clone())));
    groups.expect_count_admins().times(1).return_once(|_| Ok(1));
    groups.expect_remove_membership().never();

    let error = make_service(groups, MockUserRepository::new())
        .remove_user(&group_id, &admin_id, &admin_id)
        .await
        .expect_err("last admin");
    assert_eq!(error.code(), ErrorCode::Conflict);
    assert!(error.errors().contains_key("group_without_admin"));
}

#[tokio::test]
async fn members_may_leave_on_their_own() {
    let group_id = Identifier::random();
    let member_id = Identifier::random();
    let member = membership(&group_id, &member_id, GroupRole::User);
    let mut groups = MockGroupRepository::new();
    groups
        .expect_find_membership()
        .times(2)
        .returning(move |_, _| Ok(Some(member.clone())));
    groups.expect_count_admins().never();
    groups
        .expect_remove_membership()
        .times(1)
        .return_once(|_, _| Ok(true));

    make_service(groups, MockUserRepository::new())
        .remove_user(&group_id, &member_id, &member_id)
        .await
        .expect("member left");
}

#[tokio::test]
async fn members_cannot_remove_others() {
    let group_id = Identifier::random();
    let member_id = Identifier::random();
    let member = membership(&group_id, &member_id, GroupRole::User);
    let mut groups = MockGroupRepository::new();
    groups
        .expect_find_membership()
        .times(1)
        .return_once(move |_, _| Ok(Some(member)));

    let error = make_service(groups, MockUserRepository::new())
        .remove_user(&group_id, &member_id, &Identifier::random())
        .await
        .expect_err("not admin");
    assert!(error.errors().contains_key("permissions"));
}
