use crate::model::{ChatMessage, Role};

pub const DEFAULT_GREETING: &str =
    "I'm your AI cooking assistant. How can I help you with recipes or cooking advice today?";

const COOKING_REPLY: &str = "To make a basic pasta dish, boil pasta according to package instructions. Meanwhile, sauté garlic in olive oil, add your favorite vegetables or protein, and season with salt and pepper. Drain the pasta and toss with the sauce. Finish with grated cheese if desired!";

const SUBSTITUTION_REPLY: &str = "You can substitute eggs in baking with several alternatives: 1/4 cup applesauce, 1/4 cup mashed banana, 1 tablespoon ground flaxseed mixed with 3 tablespoons water, or 1/4 cup yogurt all work well as a replacement for one egg.";

const TECHNIQUE_REPLY: &str = "To properly sear meat, make sure your pan is very hot before adding the meat. Pat the meat dry with paper towels first, as moisture prevents proper searing. Don't move the meat too soon - let it develop a crust before flipping. This usually takes 3-4 minutes per side depending on thickness.";

const REDIRECT_REPLY: &str = "I'm not sure about that specific cooking question. Could you ask about recipes, ingredient substitutions, or cooking techniques?";

/// Keyword groups checked in order against the last user message
const KEYWORD_REPLIES: &[(&[&str], &str)] = &[
    (&["recipe", "make", "cook"], COOKING_REPLY),
    (&["substitute", "replace", "instead of"], SUBSTITUTION_REPLY),
    (&["how to", "technique", "method"], TECHNIQUE_REPLY),
];

/// Pick a canned reply by keyword match on the most recent user message
pub fn canned_reply(messages: &[ChatMessage]) -> &'static str {
    let Some(last) = messages.iter().rev().find(|m| m.role == Role::User) else {
        return DEFAULT_GREETING;
    };

    let query = last.content.to_lowercase();
    KEYWORD_REPLIES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| query.contains(k)))
        .map(|(_, reply)| *reply)
        .unwrap_or(REDIRECT_REPLY)
}
