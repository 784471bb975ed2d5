use crate::llm::TextProvider;
use serde::{Deserialize, Serialize};

/// Wrong guesses allowed before the round is lost.
pub const STARTING_LIVES: u8 = 6;

/// One playthrough: the target word plus everything the player has done to it.
///
/// The word is fixed at construction and only replaced by starting a new
/// round. All guess handling goes through [`Round::apply_guess`], which
/// returns a new value instead of editing in place.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    word: String,
    guessed: Vec<char>,
    lives: u8,
    hint: Option<String>,
    over: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Novel letter present in the word.
    Hit,
    /// Novel letter absent from the word; costs a life.
    Miss,
    /// Letter was already guessed; nothing changes.
    Repeat,
    /// Input was not a single letter; nothing changes.
    Rejected,
    /// The round was already over; nothing changes.
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundStatus {
    InProgress,
    Won,
    Lost,
}

impl Round {
    pub fn new(word: String) -> Self {
        Self {
            word,
            guessed: Vec::new(),
            lives: STARTING_LIVES,
            hint: None,
            over: false,
        }
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    /// Letters guessed so far, in submission order.
    pub fn guessed(&self) -> &[char] {
        &self.guessed
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn set_hint(&mut self, hint: String) {
        self.hint = Some(hint);
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    /// Win is checked before lose: a final guess that completes the word is
    /// a win even when no lives would remain.
    pub fn status(&self) -> RoundStatus {
        if self.word.chars().all(|c| self.guessed.contains(&c)) {
            RoundStatus::Won
        } else if self.lives == 0 {
            RoundStatus::Lost
        } else {
            RoundStatus::InProgress
        }
    }

    /// The word with unguessed letters replaced by `_`, space-separated.
    pub fn masked(&self) -> String {
        let shown: Vec<String> = self
            .word
            .chars()
            .map(|c| {
                if self.guessed.contains(&c) {
                    c.to_string()
                } else {
                    "_".to_string()
                }
            })
            .collect();
        shown.join(" ")
    }

    pub fn guessed_display(&self) -> String {
        let letters: Vec<String> = self.guessed.iter().map(char::to_string).collect();
        letters.join(" ")
    }

    /// Apply one raw guess and report what happened.
    ///
    /// Pure: the receiver is never modified. Anything that is not exactly
    /// one alphabetic character leaves the round untouched, as does any
    /// input once the round is over.
    #[must_use]
    pub fn apply_guess(&self, raw: &str) -> (Round, GuessOutcome) {
        if self.over {
            return (self.clone(), GuessOutcome::Finished);
        }

        let input = raw.trim().to_lowercase();
        let mut chars = input.chars();
        let letter = match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => c,
            _ => return (self.clone(), GuessOutcome::Rejected),
        };

        if self.guessed.contains(&letter) {
            return (self.clone(), GuessOutcome::Repeat);
        }

        let mut next = self.clone();
        next.guessed.push(letter);
        let outcome = if next.word.contains(letter) {
            GuessOutcome::Hit
        } else {
            next.lives = next.lives.saturating_sub(1);
            GuessOutcome::Miss
        };
        next.over = next.status() != RoundStatus::InProgress;
        (next, outcome)
    }
}

/// Player intents the interfaces translate key presses / input lines into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserAction {
    Guess(String),
    Hint,
    NewGame,
    Exit,
}

/// Seam between the game loop and a frontend.
///
/// Implementations render state and gather input; they hold no game logic.
pub trait GameInterface {
    /// Render the current state and block until the player picks an action.
    /// `round` is `None` when no word could be fetched yet. Returning `None`
    /// means "nothing actionable happened, ask again".
    fn read_action(&mut self, round: Option<&Round>) -> Option<UserAction>;

    /// A guess was processed; `round` is the state after it.
    fn notify_outcome(&mut self, outcome: GuessOutcome, round: &Round);

    /// A provider call is in flight.
    fn notify_busy(&mut self, message: &str);

    /// A provider call failed; the round is unchanged.
    fn notify_error(&mut self, message: &str);

    fn notify_exit(&mut self);
}

/// Drive rounds until the player exits. Returns the last round, if any,
/// so callers (and tests) can inspect the final state.
pub fn game_loop<P, I>(provider: &P, interface: &mut I) -> Option<Round>
where
    P: TextProvider + ?Sized,
    I: GameInterface,
{
    let mut round = start_round(provider, interface);

    loop {
        let Some(action) = interface.read_action(round.as_ref()) else {
            continue;
        };

        match action {
            UserAction::Exit => {
                interface.notify_exit();
                break;
            }
            UserAction::NewGame => {
                round = start_round(provider, interface);
            }
            UserAction::Guess(raw) => {
                if let Some(current) = &round {
                    let (next, outcome) = current.apply_guess(&raw);
                    interface.notify_outcome(outcome, &next);
                    round = Some(next);
                }
            }
            UserAction::Hint => {
                if let Some(current) = round.as_mut() {
                    interface.notify_busy("Asking the model for a hint...");
                    match provider.fetch_hint(current.word()) {
                        Ok(hint) => current.set_hint(hint),
                        Err(e) => {
                            log::warn!("hint fetch failed: {e}");
                            interface.notify_error(&format!("Could not fetch a hint: {e}"));
                        }
                    }
                }
            }
        }
    }

    round
}

fn start_round<P, I>(provider: &P, interface: &mut I) -> Option<Round>
where
    P: TextProvider + ?Sized,
    I: GameInterface,
{
    interface.notify_busy("Fetching a word from the model...");
    match provider.fetch_word() {
        Ok(word) => {
            log::info!("new round started, {} letters", word.len());
            Some(Round::new(word))
        }
        Err(e) => {
            log::warn!("word fetch failed: {e}");
            interface.notify_error(&format!("Could not fetch a word: {e}"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round(word: &str) -> Round {
        Round::new(word.to_string())
    }

    fn guess_all(round: Round, guesses: &[&str]) -> Round {
        guesses.iter().fold(round, |r, g| r.apply_guess(g).0)
    }

    #[test]
    fn test_new_round_defaults() {
        let r = round("kite");
        assert_eq!(r.lives(), STARTING_LIVES);
        assert!(r.guessed().is_empty());
        assert_eq!(r.hint(), None);
        assert!(!r.is_over());
        assert_eq!(r.status(), RoundStatus::InProgress);
    }

    #[test]
    fn test_hit_records_letter_without_costing_a_life() {
        let (next, outcome) = round("kite").apply_guess("k");
        assert_eq!(outcome, GuessOutcome::Hit);
        assert_eq!(next.guessed(), &['k']);
        assert_eq!(next.lives(), STARTING_LIVES);
    }

    #[test]
    fn test_miss_costs_exactly_one_life() {
        let (next, outcome) = round("kite").apply_guess("z");
        assert_eq!(outcome, GuessOutcome::Miss);
        assert_eq!(next.guessed(), &['z']);
        assert_eq!(next.lives(), STARTING_LIVES - 1);
    }

    #[test]
    fn test_guess_is_normalized_to_lowercase() {
        let (next, outcome) = round("kite").apply_guess("  K ");
        assert_eq!(outcome, GuessOutcome::Hit);
        assert_eq!(next.guessed(), &['k']);
    }

    #[test]
    fn test_repeat_guess_is_a_noop() {
        let (once, _) = round("kite").apply_guess("k");
        let (twice, outcome) = once.apply_guess("k");
        assert_eq!(outcome, GuessOutcome::Repeat);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_repeated_miss_does_not_cost_another_life() {
        let (once, _) = round("kite").apply_guess("z");
        let (twice, outcome) = once.apply_guess("z");
        assert_eq!(outcome, GuessOutcome::Repeat);
        assert_eq!(twice.lives(), STARTING_LIVES - 1);
    }

    #[test]
    fn test_invalid_input_is_a_noop() {
        let r = round("kite");
        for bad in ["", "ab", "1", "!", "k1", "  ", "kite"] {
            let (next, outcome) = r.apply_guess(bad);
            assert_eq!(outcome, GuessOutcome::Rejected, "input {bad:?}");
            assert_eq!(next, r, "input {bad:?}");
        }
    }

    #[test]
    fn test_lives_never_negative_and_monotonic() {
        let mut r = round("kite");
        let mut previous = r.lives();
        for g in ["q", "x", "z", "j", "v", "w", "b", "c", "d"] {
            r = r.apply_guess(g).0;
            assert!(r.lives() <= previous);
            previous = r.lives();
        }
        assert_eq!(r.lives(), 0);
    }

    #[test]
    fn test_win_on_all_distinct_letters() {
        let r = guess_all(round("kite"), &["k", "i", "t", "e"]);
        assert!(r.is_over());
        assert_eq!(r.status(), RoundStatus::Won);
        assert_eq!(r.lives(), STARTING_LIVES);
    }

    #[test]
    fn test_win_with_repeated_letters_in_word() {
        // one 'l' covers both positions in "llama"
        let r = guess_all(round("llama"), &["l", "a", "m"]);
        assert_eq!(r.status(), RoundStatus::Won);
        assert!(r.is_over());
    }

    #[test]
    fn test_lose_after_six_misses() {
        let r = guess_all(round("kite"), &["q", "x", "z", "j", "v", "w"]);
        assert_eq!(r.lives(), 0);
        assert!(r.is_over());
        assert_eq!(r.status(), RoundStatus::Lost);
    }

    #[test]
    fn test_no_guesses_processed_after_game_over() {
        let lost = guess_all(round("kite"), &["q", "x", "z", "j", "v", "w"]);
        let (after, outcome) = lost.apply_guess("k");
        assert_eq!(outcome, GuessOutcome::Finished);
        assert_eq!(after, lost);

        let won = guess_all(round("kite"), &["k", "i", "t", "e"]);
        let (after, outcome) = won.apply_guess("z");
        assert_eq!(outcome, GuessOutcome::Finished);
        assert_eq!(after, won);
    }

    #[test]
    fn test_final_hit_on_last_life_is_a_win() {
        // Burn down to one life, then complete the word: the win check runs
        // first, so this must never report a loss.
        let r = guess_all(round("kite"), &["q", "x", "z", "j", "v", "k", "i", "t"]);
        assert_eq!(r.lives(), 1);
        assert!(!r.is_over());

        let (done, outcome) = r.apply_guess("e");
        assert_eq!(outcome, GuessOutcome::Hit);
        assert_eq!(done.status(), RoundStatus::Won);
        assert_eq!(done.lives(), 1);
    }

    #[test]
    fn test_masked_word_reveals_only_guessed_letters() {
        let r = round("kite");
        assert_eq!(r.masked(), "_ _ _ _");

        let r = guess_all(r, &["k", "e", "z"]);
        assert_eq!(r.masked(), "k _ _ e");

        let r = guess_all(r, &["i", "t"]);
        assert_eq!(r.masked(), "k i t e");
    }

    #[test]
    fn test_guessed_display_preserves_submission_order() {
        let r = guess_all(round("kite"), &["t", "z", "k"]);
        assert_eq!(r.guessed_display(), "t z k");
    }

    #[test]
    fn test_hint_survives_guesses() {
        let mut r = round("kite");
        r.set_hint("Flies on a string.".to_string());
        let r = guess_all(r, &["k", "z"]);
        assert_eq!(r.hint(), Some("Flies on a string."));
    }

    #[test]
    fn test_new_round_starts_clean() {
        let mut played = guess_all(round("kite"), &["k", "z"]);
        played.set_hint("Flies on a string.".to_string());

        let fresh = round("plume");
        assert_eq!(fresh.lives(), STARTING_LIVES);
        assert!(fresh.guessed().is_empty());
        assert_eq!(fresh.hint(), None);
        assert_ne!(played, fresh);
    }
}
