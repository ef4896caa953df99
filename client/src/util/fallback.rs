//! Canned replies used when the proxy call fails.
//!
//! The table is an ordered list of rules checked against the lowercased user
//! message; the first rule with a matching keyword wins, otherwise the
//! default reply is used.

#[cfg(test)]
#[path = "fallback_test.rs"]
mod fallback_test;

/// How a rule's keywords are compared against the message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Matcher {
    /// Any keyword appears as a substring.
    Contains(&'static [&'static str]),
    /// Any keyword appears as a whole word (alphanumeric boundaries).
    Word(&'static [&'static str]),
}

impl Matcher {
    fn matches(self, lowered: &str) -> bool {
        match self {
            Self::Contains(keywords) => keywords.iter().any(|k| lowered.contains(k)),
            Self::Word(keywords) => lowered
                .split(|c: char| !c.is_alphanumeric())
                .any(|word| keywords.contains(&word)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FallbackRule {
    pub matcher: Matcher,
    pub reply: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FallbackTable {
    rules: Vec<FallbackRule>,
    default_reply: &'static str,
}

pub const PROJECTS_REPLY: &str = "Aryan has built some cool stuff! Check out Monolith (local-first notes), AiThena (AI study copilot), and several Shopify stores. Which one interests you?";
pub const SKILLS_REPLY: &str = "Aryan is fluent in React, TypeScript, and Next.js. He's currently diving deep into Java, Spring Boot, and distributed systems. Also experienced with Shopify development!";
pub const CONTACT_REPLY: &str = "You can reach Aryan at offaryanpatel@gmail.com or connect on LinkedIn/GitHub. Links are in the sidebar!";
pub const SHOPIFY_REPLY: &str = "Aryan has built multiple e-commerce stores on Shopify - from fashion brands to tech stores. He handles custom themes, product configurators, and advanced features.";
pub const MONOLITH_REPLY: &str = "Monolith is a local-first markdown app with 60x faster rendering using virtual scrolling. Your notes stay on YOUR device. Check it out at monolith.patelaryan.com!";
pub const AITHENA_REPLY: &str = "AiThena is an AI-powered study copilot that transforms PDFs and videos into summaries, quizzes, and flashcards. Perfect for students!";
pub const HELLO_REPLY: &str = "Hey there! Great to meet you. I'm a digital version of Aryan. Ask me anything about his work!";
pub const HI_REPLY: &str = "Hello! I'm Aryan's AI twin. What would you like to know about his projects or skills?";
pub const DEFAULT_REPLY: &str = "I'm Aryan's AI twin! I can tell you about his projects, skills, or how to get in touch. What would you like to know?";

impl FallbackTable {
    pub fn new(rules: Vec<FallbackRule>, default_reply: &'static str) -> Self {
        Self { rules, default_reply }
    }

    /// First matching rule's reply for `message`, or the default.
    pub fn reply_for(&self, message: &str) -> &'static str {
        let lowered = message.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matcher.matches(&lowered))
            .map_or(self.default_reply, |rule| rule.reply)
    }

    pub fn rules(&self) -> &[FallbackRule] {
        &self.rules
    }
}

impl Default for FallbackTable {
    fn default() -> Self {
        Self::new(
            vec![
                FallbackRule { matcher: Matcher::Contains(&["project"]), reply: PROJECTS_REPLY },
                FallbackRule { matcher: Matcher::Contains(&["skill", "tech", "stack"]), reply: SKILLS_REPLY },
                FallbackRule { matcher: Matcher::Contains(&["contact", "email", "reach"]), reply: CONTACT_REPLY },
                FallbackRule { matcher: Matcher::Contains(&["shopify", "store", "ecommerce"]), reply: SHOPIFY_REPLY },
                FallbackRule { matcher: Matcher::Contains(&["monolith", "notes"]), reply: MONOLITH_REPLY },
                FallbackRule { matcher: Matcher::Contains(&["aithena", "study"]), reply: AITHENA_REPLY },
                FallbackRule { matcher: Matcher::Contains(&["hello", "hey"]), reply: HELLO_REPLY },
                FallbackRule { matcher: Matcher::Contains(&["hi"]), reply: HI_REPLY },
            ],
            DEFAULT_REPLY,
        )
    }
}
