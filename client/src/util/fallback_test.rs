use super::*;

#[test]
fn contact_is_case_insensitive() {
    let table = FallbackTable::default();
    assert_eq!(table.reply_for("How do I CONTACT you?"), CONTACT_REPLY);
    assert_eq!(table.reply_for("contact"), CONTACT_REPLY);
    assert_eq!(table.reply_for("what's your Email"), CONTACT_REPLY);
}

#[test]
fn topics_map_to_their_replies() {
    let table = FallbackTable::default();
    assert_eq!(table.reply_for("Show me your Projects"), PROJECTS_REPLY);
    assert_eq!(table.reply_for("what tech do you use"), SKILLS_REPLY);
    assert_eq!(table.reply_for("any shopify work?"), SHOPIFY_REPLY);
    assert_eq!(table.reply_for("tell me about monolith"), MONOLITH_REPLY);
    assert_eq!(table.reply_for("AiThena?"), AITHENA_REPLY);
    assert_eq!(table.reply_for("hey"), HELLO_REPLY);
    assert_eq!(table.reply_for("Hi!"), HI_REPLY);
}

#[test]
fn first_match_wins() {
    let table = FallbackTable::default();
    // Both "project" and "contact" match; projects comes first.
    assert_eq!(table.reply_for("contact me about a project"), PROJECTS_REPLY);
}

#[test]
fn hi_matches_anywhere_in_message() {
    let table = FallbackTable::default();
    assert_eq!(table.reply_for("oh hi there"), HI_REPLY);
    assert_eq!(table.reply_for("which one?"), HI_REPLY);
    assert_eq!(table.reply_for("what is this"), HI_REPLY);
}

#[test]
fn earlier_rules_beat_hi() {
    let table = FallbackTable::default();
    assert_eq!(table.reply_for("hi, what's your stack?"), SKILLS_REPLY);
    assert_eq!(table.reply_for("hi hello"), HELLO_REPLY);
}

#[test]
fn replies_keep_original_facts() {
    assert!(SKILLS_REPLY.contains("Java, Spring Boot, and distributed systems"));
    assert!(MONOLITH_REPLY.contains("60x faster rendering"));
    assert!(AITHENA_REPLY.ends_with("Perfect for students!"));
}

#[test]
fn unmatched_gets_default() {
    let table = FallbackTable::default();
    assert_eq!(table.reply_for("what's the weather like"), DEFAULT_REPLY);
    assert_eq!(table.reply_for(""), DEFAULT_REPLY);
}

#[test]
fn custom_table_is_data_driven() {
    let table = FallbackTable::new(
        vec![FallbackRule { matcher: Matcher::Contains(&["rust"]), reply: "crab" }],
        "fallback",
    );
    assert_eq!(table.rules().len(), 1);
    assert_eq!(table.reply_for("I like RUST"), "crab");
    assert_eq!(table.reply_for("contact"), "fallback");
}

#[test]
fn word_matcher_needs_whole_word() {
    let table = FallbackTable::new(
        vec![FallbackRule { matcher: Matcher::Word(&["go"]), reply: "gopher" }],
        "fallback",
    );
    assert_eq!(table.reply_for("Do you write Go?"), "gopher");
    assert_eq!(table.reply_for("good morning"), "fallback");
}
