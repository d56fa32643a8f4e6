//! Authentication tests: password hashing and the login throttle.

use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use topmarket::auth::password;
use topmarket::auth::rate_limit::LoginThrottle;
use topmarket::handlers::reminder_handlers::bearer_matches;

const TEST_PASSWORD: &str = "password123";

#[test]
fn test_verify_password_correct_and_incorrect() {
    let hash = password::hash_password(TEST_PASSWORD).expect("Failed to hash password");
    assert!(password::verify_password(TEST_PASSWORD, &hash).expect("verify"));
    assert!(!password::verify_password("wrongpassword", &hash).expect("verify"));
}

#[test]
fn test_hash_password_randomness() {
    let hash1 = password::hash_password(TEST_PASSWORD).expect("hash");
    let hash2 = password::hash_password(TEST_PASSWORD).expect("hash");
    // Same password should produce different hashes (different salts)
    assert_ne!(hash1, hash2);
}

#[test]
fn test_verify_against_malformed_hash_is_error() {
    assert!(password::verify_password(TEST_PASSWORD, "not-a-hash").is_err());
}

fn ip(last: u8) -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(10, 0, 0, last))
}

#[test]
fn test_throttle_blocks_after_max_failures() {
    let throttle = LoginThrottle::new(3, Duration::from_secs(60));
    for _ in 0..2 {
        throttle.record_failure(ip(1), "ana@x.mx");
    }
    assert!(!throttle.is_blocked(ip(1), "ana@x.mx"));
    throttle.record_failure(ip(1), "ANA@x.mx ");
    assert!(throttle.is_blocked(ip(1), "ana@x.mx"));
    assert!(!throttle.is_blocked(ip(1), "otro@x.mx"));
}

#[test]
fn test_throttle_does_not_lock_account_for_other_addresses() {
    let throttle = LoginThrottle::new(2, Duration::from_secs(60));
    throttle.record_failure(ip(66), "ana@x.mx");
    throttle.record_failure(ip(66), "ana@x.mx");
    assert!(throttle.is_blocked(ip(66), "ana@x.mx"));
    assert!(!throttle.is_blocked(ip(1), "ana@x.mx"));
}

#[test]
fn test_throttle_clear_resets_email() {
    let throttle = LoginThrottle::new(1, Duration::from_secs(60));
    throttle.record_failure(ip(1), "ana@x.mx");
    assert!(throttle.is_blocked(ip(1), "ana@x.mx"));
    throttle.clear(ip(1), "ana@x.mx");
    assert!(!throttle.is_blocked(ip(1), "ana@x.mx"));
}

#[test]
fn test_throttle_window_expires() {
    let throttle = LoginThrottle::new(1, Duration::from_millis(20));
    throttle.record_failure(ip(1), "ana@x.mx");
    assert!(throttle.is_blocked(ip(1), "ana@x.mx"));
    std::thread::sleep(Duration::from_millis(40));
    assert!(!throttle.is_blocked(ip(1), "ana@x.mx"));
}

#[test]
fn test_throttle_drops_stale_emails_on_new_failure() {
    let throttle = LoginThrottle::new(5, Duration::from_millis(20));
    for n in 0..50 {
        throttle.record_failure(ip(1), &format!("nadie{n}@x.mx"));
    }
    assert_eq!(throttle.tracked(), 50);
    std::thread::sleep(Duration::from_millis(40));
    throttle.record_failure(ip(2), "ana@x.mx");
    assert_eq!(throttle.tracked(), 1);
}

#[test]
fn test_bearer_token_matching() {
    assert!(bearer_matches(Some("Bearer s3cret"), Some("s3cret")));
    assert!(!bearer_matches(Some("Bearer wrong"), Some("s3cret")));
    assert!(!bearer_matches(Some("s3cret"), Some("s3cret")));
    assert!(!bearer_matches(None, Some("s3cret")));
    assert!(!bearer_matches(Some("Bearer "), None));
}
