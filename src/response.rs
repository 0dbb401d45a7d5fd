//! Response selection for a predicted intent.

use log::debug;
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::intent::types::IntentSet;

/// Reply used when the matched intent has no responses.
pub const NO_RESPONSE_REPLY: &str = "I don't have a response for this intent.";

/// Reply used when the message cannot be mapped to an intent.
pub const NOT_UNDERSTOOD_REPLY: &str = "Sorry, I don't understand!";

/// Pick a reply for `label`.
///
/// A response is chosen uniformly at random from the intent's responses. An
/// intent without responses yields [`NO_RESPONSE_REPLY`]; a label that
/// matches no intent yields [`NOT_UNDERSTOOD_REPLY`].
///
/// # Examples
///
/// ```
/// use colloquy::intent::{Intent, IntentSet};
/// use colloquy::response::{NOT_UNDERSTOOD_REPLY, select_response};
///
/// let intents = IntentSet::new(vec![Intent::new(
///     "greeting",
///     vec!["hello".to_string()],
///     vec!["Hi!".to_string()],
/// )]);
///
/// let mut rng = rand::rng();
/// assert_eq!(select_response("greeting", &intents, &mut rng), "Hi!");
/// assert_eq!(select_response("weather", &intents, &mut rng), NOT_UNDERSTOOD_REPLY);
/// ```
pub fn select_response<R: Rng + ?Sized>(label: &str, intents: &IntentSet, rng: &mut R) -> String {
    let Some(intent) = intents.get(label) else {
        debug!("No intent with tag '{label}'");
        return NOT_UNDERSTOOD_REPLY.to_string();
    };

    debug!("Selected responses for {label}: {:?}", intent.responses);
    intent
        .responses
        .choose(rng)
        .cloned()
        .unwrap_or_else(|| NO_RESPONSE_REPLY.to_string())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::intent::types::Intent;

    fn intents() -> IntentSet {
        IntentSet::new(vec![
            Intent::new(
                "greeting",
                vec!["hello".to_string()],
                vec!["Hi!".to_string()],
            ),
            Intent::new(
                "fees",
                vec!["fee".to_string()],
                vec!["Rs. 1,00,000".to_string(), "See the fee page".to_string()],
            ),
            Intent::new("silent", vec!["shh".to_string()], Vec::new()),
        ])
    }

    #[test]
    fn test_single_response() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..10 {
            assert_eq!(select_response("greeting", &intents(), &mut rng), "Hi!");
        }
    }

    #[test]
    fn test_empty_responses() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            select_response("silent", &intents(), &mut rng),
            NO_RESPONSE_REPLY
        );
    }

    #[test]
    fn test_unknown_label() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            select_response("weather", &intents(), &mut rng),
            NOT_UNDERSTOOD_REPLY
        );
    }

    #[test]
    fn test_covers_all_responses() {
        let set = intents();
        let mut rng = StdRng::seed_from_u64(7);
        let seen: HashSet<String> = (0..200)
            .map(|_| select_response("fees", &set, &mut rng))
            .collect();
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_seeded_selection_is_reproducible() {
        let set = intents();
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        for _ in 0..20 {
            assert_eq!(
                select_response("fees", &set, &mut a),
                select_response("fees", &set, &mut b)
            );
        }
    }
}
