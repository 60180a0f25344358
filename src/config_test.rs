use super::*;

// =============================================================================
// parse_service
// =============================================================================

#[test]
fn parse_service_missing_is_error() {
    assert_eq!(parse_service(None), Err(ConfigError::Missing("SERVICE")));
}

#[test]
fn parse_service_accepts_canonical_names() {
    assert_eq!(parse_service(Some("users")), Ok(ServiceKind::Users));
    assert_eq!(parse_service(Some("mentors")), Ok(ServiceKind::Mentors));
    assert_eq!(parse_service(Some("bookings")), Ok(ServiceKind::Bookings));
    assert_eq!(parse_service(Some("messaging")), Ok(ServiceKind::Messaging));
    assert_eq!(parse_service(Some("code-review")), Ok(ServiceKind::CodeReview));
    assert_eq!(parse_service(Some("webrtc")), Ok(ServiceKind::WebRtc));
}

#[test]
fn parse_service_is_case_insensitive_and_trimmed() {
    assert_eq!(parse_service(Some("  Users ")), Ok(ServiceKind::Users));
    assert_eq!(parse_service(Some("CODE_REVIEW")), Ok(ServiceKind::CodeReview));
}

#[test]
fn parse_service_rejects_unknown() {
    assert_eq!(
        parse_service(Some("payments")),
        Err(ConfigError::UnknownService("payments".to_owned()))
    );
}

// =============================================================================
// parse_port
// =============================================================================

#[test]
fn parse_port_defaults_when_unset() {
    assert_eq!(parse_port(None), Ok(DEFAULT_PORT));
}

#[test]
fn parse_port_parses_value() {
    assert_eq!(parse_port(Some("8081")), Ok(8081));
}

#[test]
fn parse_port_rejects_garbage() {
    assert_eq!(parse_port(Some("eighty")), Err(ConfigError::InvalidPort("eighty".to_owned())));
    assert_eq!(parse_port(Some("70000")), Err(ConfigError::InvalidPort("70000".to_owned())));
}

// =============================================================================
// ServiceKind
// =============================================================================

#[test]
fn only_persisted_services_need_database() {
    assert!(ServiceKind::Users.needs_database());
    assert!(ServiceKind::Messaging.needs_database());
    assert!(ServiceKind::CodeReview.needs_database());
    assert!(!ServiceKind::Mentors.needs_database());
    assert!(!ServiceKind::Bookings.needs_database());
    assert!(!ServiceKind::WebRtc.needs_database());
}

#[test]
fn display_uses_service_name() {
    assert_eq!(ServiceKind::Messaging.to_string(), "Messaging-Service");
}

// =============================================================================
// env_parse uses unique env var names to avoid races with parallel tests.
// =============================================================================

#[test]
fn env_parse_missing_returns_default() {
    let val: u32 = env_parse("__TEST_SB_NONEXISTENT_KEY_4411__", 42);
    assert_eq!(val, 42);
}

#[test]
fn env_parse_present_valid() {
    unsafe { std::env::set_var("__TEST_SB_EP_VALID__", "99") };
    let val: u32 = env_parse("__TEST_SB_EP_VALID__", 0);
    assert_eq!(val, 99);
    unsafe { std::env::remove_var("__TEST_SB_EP_VALID__") };
}

#[test]
fn env_parse_present_invalid_returns_default() {
    unsafe { std::env::set_var("__TEST_SB_EP_INVALID__", "notanumber") };
    let val: u64 = env_parse("__TEST_SB_EP_INVALID__", 7);
    assert_eq!(val, 7);
    unsafe { std::env::remove_var("__TEST_SB_EP_INVALID__") };
}
