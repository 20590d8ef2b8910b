//! Validation and serialisation coverage for user value objects.

use super::*;
use rstest::{fixture, rstest};
use serde_json::Value;

#[fixture]
fn draft() -> UserDraft {
    UserDraft {
        id: UserId::random(),
        username: Username::new("username").expect("valid username"),
        first_name: "Full".to_owned(),
        last_name: "Name".to_owned(),
        display_name: DisplayName::new("Full Name").expect("valid display name"),
        email: EmailAddress::new("test@test.com").expect("valid email"),
        created_at: Utc::now(),
    }
}

#[rstest]
#[case("", UserValidationError::EmptyId)]
#[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", UserValidationError::InvalidId)]
#[case("not-a-uuid", UserValidationError::InvalidId)]
fn user_id_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(UserId::new(raw), Err(expected));
}

#[rstest]
fn user_id_round_trips_through_display() {
    let id = UserId::random();
    assert_eq!(UserId::new(id.to_string()), Ok(id));
}

#[rstest]
#[case("   ", UserValidationError::EmptyUsername)]
#[case("has space", UserValidationError::UsernameInvalidCharacters)]
fn username_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(Username::new(raw), Err(expected));
}

#[rstest]
fn username_is_trimmed() {
    let username = Username::new("  ada.lovelace  ").expect("valid username");
    assert_eq!(username.as_ref(), "ada.lovelace");
}

#[rstest]
fn username_length_is_bounded() {
    let raw = "a".repeat(USERNAME_MAX + 1);
    assert_eq!(
        Username::new(raw),
        Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX })
    );
}

#[rstest]
#[case("test@test.com", true)]
#[case("  spaced@example.org ", true)]
#[case("missing-at.example.org", false)]
#[case("no@tld", false)]
#[case("", false)]
fn email_shape_is_checked(#[case] raw: &str, #[case] valid: bool) {
    assert_eq!(EmailAddress::new(raw).is_ok(), valid);
}

#[rstest]
fn user_requires_first_name(mut draft: UserDraft) {
    draft.first_name = "  ".to_owned();
    assert_eq!(User::new(draft), Err(UserValidationError::EmptyFirstName));
}

#[rstest]
fn user_requires_last_name(mut draft: UserDraft) {
    draft.last_name = String::new();
    assert_eq!(User::new(draft), Err(UserValidationError::EmptyLastName));
}

#[rstest]
fn user_serialises_with_document_style_id(draft: UserDraft) {
    let id = draft.id;
    let user = User::new(draft).expect("valid user");
    let value = serde_json::to_value(&user).expect("serialise user");

    assert_eq!(value.get("_id").and_then(Value::as_str), Some(id.to_string().as_str()));
    assert_eq!(value.get("displayName").and_then(Value::as_str), Some("Full Name"));
    assert_eq!(value.get("provider").and_then(Value::as_str), Some("local"));
    assert!(value.get("created").is_some());
    assert!(value.get("password").is_none());
}

#[rstest]
fn summary_carries_id_and_display_name(draft: UserDraft) {
    let user = User::new(draft).expect("valid user");
    let summary = user.summary();
    let value = serde_json::to_value(&summary).expect("serialise summary");

    assert_eq!(summary.id, *user.id());
    assert_eq!(value.get("displayName").and_then(Value::as_str), Some("Full Name"));
}
