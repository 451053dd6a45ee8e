use crate::achievements::{Achievement, Achievements};
use crate::challenges::{ChallengeKind, DailyChallenges, Reward};
use crate::consts;
use crate::engine::GameEvent;
use crate::skins::{Skin, SkinError, SkinWallet};
use crate::store::Store;
use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Serialize};
use std::fmt;

/// Everything about the player that outlives a single game: the high score,
/// achievements, daily challenges, and skins.  Persistent parts are written
/// to the [`Store`] as they change; failures to do so are logged and
/// otherwise ignored.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Profile {
    store: Store,
    high_score: u32,
    achievements: Achievements,
    challenges: DailyChallenges,
    wallet: SkinWallet,
}

impl Profile {
    pub(crate) fn load(store: Store, today: NaiveDate) -> Profile {
        let high_score = fetch(&store, consts::HIGH_SCORE_KEY).unwrap_or(0);
        let mut challenges =
            fetch(&store, consts::CHALLENGES_KEY).unwrap_or_else(|| DailyChallenges::new(today));
        challenges.refresh(today);
        let wallet = fetch(&store, consts::SKINS_KEY).unwrap_or_default();
        Profile {
            store,
            high_score,
            achievements: Achievements::new(),
            challenges,
            wallet,
        }
    }

    pub(crate) fn high_score(&self) -> u32 {
        self.high_score
    }

    pub(crate) fn skin(&self) -> Skin {
        self.wallet.current()
    }

    pub(crate) fn wallet_points(&self) -> u32 {
        self.wallet.points()
    }

    pub(crate) fn achievements(&self) -> &Achievements {
        &self.achievements
    }

    pub(crate) fn challenges(&self) -> &DailyChallenges {
        &self.challenges
    }

    /// Update all trackers in response to an engine event.  `today` is the
    /// current local date, used to roll the daily challenges over.  Returns
    /// messages to show to the player.
    pub(crate) fn observe(&mut self, event: &GameEvent, today: NaiveDate) -> Vec<Notice> {
        let mut notices = Vec::new();
        if matches!(event, GameEvent::Started | GameEvent::Reset) && self.challenges.refresh(today)
        {
            persist(&mut self.store, consts::CHALLENGES_KEY, &self.challenges);
        }
        notices.extend(
            self.achievements
                .observe(event)
                .into_iter()
                .map(Notice::Achievement),
        );
        let completed = self.challenges.observe(event);
        if !completed.is_empty() {
            for &kind in &completed {
                match kind.reward() {
                    Reward::Points(n) => self.wallet.add_points(n),
                    Reward::Skin(skin) => {
                        self.wallet.unlock(skin);
                    }
                }
                notices.push(Notice::Challenge(kind));
            }
            persist(&mut self.store, consts::CHALLENGES_KEY, &self.challenges);
            persist(&mut self.store, consts::SKINS_KEY, &self.wallet);
        }
        match *event {
            GameEvent::NewHighScore { score } => {
                self.high_score = score;
                persist(&mut self.store, consts::HIGH_SCORE_KEY, &score);
                notices.push(Notice::NewHighScore(score));
            }
            GameEvent::GameOver { score, .. } => {
                self.wallet.add_points(score);
                persist(&mut self.store, consts::SKINS_KEY, &self.wallet);
                persist(&mut self.store, consts::CHALLENGES_KEY, &self.challenges);
            }
            _ => (),
        }
        notices
    }

    /// Switch to the next owned skin
    pub(crate) fn cycle_skin(&mut self) -> Notice {
        let skin = self.wallet.cycle();
        persist(&mut self.store, consts::SKINS_KEY, &self.wallet);
        Notice::SkinSelected(skin)
    }

    /// Buy the cheapest skin not yet owned and switch to it
    pub(crate) fn buy_next_skin(&mut self) -> Notice {
        let Some(skin) = self.wallet.cheapest_locked() else {
            return Notice::AllSkinsOwned;
        };
        match self
            .wallet
            .buy(skin)
            .and_then(|()| self.wallet.select(skin))
        {
            Ok(()) => {
                persist(&mut self.store, consts::SKINS_KEY, &self.wallet);
                Notice::SkinBought(skin)
            }
            Err(e) => Notice::SkinUnavailable(e),
        }
    }

    /// Write everything persistent to the store.  `high_score` is the best
    /// score seen by the game in progress, which may not have ended yet.
    pub(crate) fn save(&mut self, high_score: u32) {
        self.high_score = self.high_score.max(high_score);
        persist(&mut self.store, consts::HIGH_SCORE_KEY, &self.high_score);
        persist(&mut self.store, consts::CHALLENGES_KEY, &self.challenges);
        persist(&mut self.store, consts::SKINS_KEY, &self.wallet);
    }
}

fn fetch<T: DeserializeOwned>(store: &Store, key: &str) -> Option<T> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Discarding unreadable {key:?} entry in store: {e}");
            None
        }
    }
}

fn persist<T: Serialize>(store: &mut Store, key: &str, value: &T) {
    if let Err(e) = store.set(key, value) {
        log::warn!("Failed to save {key:?} entry: {:?}", anyhow::Error::new(e));
    }
}

/// A message for the player about something that happened outside the game
/// proper
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Notice {
    Achievement(Achievement),
    Challenge(ChallengeKind),
    NewHighScore(u32),
    SkinSelected(Skin),
    SkinBought(Skin),
    SkinUnavailable(SkinError),
    AllSkinsOwned,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Achievement(a) => {
                write!(f, "Achievement unlocked: {a} ({})", a.description())
            }
            Notice::Challenge(c) => write!(
                f,
                "Challenge complete: {c} ({}); earned {}",
                c.description(),
                c.reward()
            ),
            Notice::NewHighScore(score) => write!(f, "New high score: {score}!"),
            Notice::SkinSelected(skin) => write!(f, "Skin: {skin}"),
            Notice::SkinBought(skin) => write!(f, "Bought the {skin} skin"),
            Notice::SkinUnavailable(e) => write!(f, "Cannot buy: {e}"),
            Notice::AllSkinsOwned => write!(f, "All skins already owned"),
        }
    }
}
