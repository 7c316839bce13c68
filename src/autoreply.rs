//! Keyword auto-responder for ticket conversations.
//!
//! Rules are checked in order against the lowercased message; the first
//! rule with any matching keyword wins. Keywords match as substrings, so
//! "show" matches the `how` rule.

struct Rule {
    keywords: &'static [&'static str],
    reply: &'static str,
}

const RULES: &[Rule] = &[
    Rule {
        keywords: &["help", "how"],
        reply: "Thanks for reaching out! We're here to help. Could you provide more details about what you need assistance with? Our team reviews all tickets and will get back to you shortly.",
    },
    Rule {
        keywords: &["bug", "error", "crash"],
        reply: "Sorry to hear you're experiencing issues! Please describe: 1) What were you doing when it happened? 2) What error did you see? 3) What device/platform? This helps us fix it faster. Our team will investigate.",
    },
    Rule {
        keywords: &["price", "cost", "robux"],
        reply: "Thanks for your interest! For pricing and product details, check our Shop section or wait for a staff member to respond with more info. We appreciate your support!",
    },
    Rule {
        keywords: &["account", "login", "password"],
        reply: "Account security is important. For account issues, a staff member will review this shortly. Please don't share sensitive info here. We're on it!",
    },
    Rule {
        keywords: &["ban", "suspended", "kicked"],
        reply: "We understand this is frustrating. A staff member will review your case and get back to you with details about your account status. Thanks for your patience.",
    },
    Rule {
        keywords: &["suggest", "idea", "feature"],
        reply: "Love your enthusiasm! Feature suggestions are valuable. A staff member will check this out. We're always looking to improve the game!",
    },
    Rule {
        keywords: &["join", "gang", "team"],
        reply: "Interested in joining? Check out our Gangs section to find one that fits you! A staff member is here if you have more questions. Good luck!",
    },
    Rule {
        keywords: &["event", "giveaway", "contest"],
        reply: "Awesome! Check the Home section for active giveaways and events. A staff member can give you more details if needed. Don't miss out!",
    },
    Rule {
        keywords: &["thanks", "thank you"],
        reply: "You're welcome! We appreciate your support and feedback. Let us know if there's anything else we can help with!",
    },
];

pub const DEFAULT_REPLY: &str = "Thanks for your message! We've received your ticket and a staff member will review it shortly. We appreciate your patience and will get back to you as soon as possible!";

/// Pick the canned reply for `text`.
pub fn reply_to(text: &str) -> &'static str {
    let text = text.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| text.contains(k)))
        .map(|rule| rule.reply)
        .unwrap_or(DEFAULT_REPLY)
}
