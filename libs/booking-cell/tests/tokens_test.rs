use std::collections::HashSet;

use booking_cell::services::tokens::{
    confirmation_number, generate_cancel_token, tokens_match, CANCEL_TOKEN_LENGTH,
};

#[test]
fn confirmation_numbers_are_date_scoped_ordinals() {
    assert_eq!(confirmation_number("2024-03-15", 1), "QS-2024-0315-001");
    assert_eq!(confirmation_number("2024-12-01", 42), "QS-2024-1201-042");
    assert_eq!(confirmation_number("2024-12-01", 1234), "QS-2024-1201-1234");
}

#[test]
fn cancel_tokens_are_alphanumeric_and_distinct() {
    let tokens: HashSet<String> = (0..50).map(|_| generate_cancel_token()).collect();
    assert_eq!(tokens.len(), 50);

    for token in &tokens {
        assert_eq!(token.len(), CANCEL_TOKEN_LENGTH);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()), "{}", token);
    }
}

#[test]
fn token_comparison() {
    let token = generate_cancel_token();
    assert!(tokens_match(&token, &token.clone()));
    assert!(!tokens_match(&token[..31], &token));
    assert!(!tokens_match("", &token));
    assert!(!tokens_match(&token.to_lowercase(), &token.to_uppercase()));
}
