use crate::util::EnumExt;
use enum_map::Enum;
use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A cosmetic look for the snake's body
#[derive(Clone, Copy, Debug, Deserialize, Enum, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Skin {
    Default,
    Neon,
    Pixel,
    Rainbow,
    Golden,
}

impl Skin {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Skin::Default => "default",
            Skin::Neon => "neon",
            Skin::Pixel => "pixel",
            Skin::Rainbow => "rainbow",
            Skin::Golden => "golden",
        }
    }

    /// Wallet points needed to buy the skin
    pub(crate) fn price(self) -> u32 {
        match self {
            Skin::Default => 0,
            Skin::Neon => 1000,
            Skin::Pixel => 2000,
            Skin::Rainbow => 5000,
            Skin::Golden => 10000,
        }
    }

    /// Glyph for a body segment
    pub(crate) fn body_symbol(self) -> char {
        match self {
            Skin::Default | Skin::Rainbow => '⚬',
            Skin::Neon => '◆',
            Skin::Pixel => '■',
            Skin::Golden => '●',
        }
    }

    /// Style for the segment at position `index` (0 = head)
    pub(crate) fn segment_style(self, index: usize) -> Style {
        match self {
            Skin::Default => Style::new().fg(Color::Green).add_modifier(Modifier::BOLD),
            Skin::Neon => Style::new()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
            Skin::Pixel => Style::new().fg(Color::LightGreen),
            Skin::Rainbow => {
                const COLORS: [Color; 6] = [
                    Color::LightRed,
                    Color::LightYellow,
                    Color::LightGreen,
                    Color::LightCyan,
                    Color::LightBlue,
                    Color::LightMagenta,
                ];
                Style::new()
                    .fg(COLORS[index % COLORS.len()])
                    .add_modifier(Modifier::BOLD)
            }
            Skin::Golden => Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        }
    }
}

impl fmt::Display for Skin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// The player's spendable points and owned skins, kept across sessions
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct SkinWallet {
    current: Skin,
    unlocked: Vec<Skin>,
    points: u32,
}

impl SkinWallet {
    pub(crate) fn new() -> SkinWallet {
        SkinWallet {
            current: Skin::Default,
            unlocked: vec![Skin::Default],
            points: 0,
        }
    }

    pub(crate) fn current(&self) -> Skin {
        self.current
    }

    pub(crate) fn points(&self) -> u32 {
        self.points
    }

    pub(crate) fn owns(&self, skin: Skin) -> bool {
        skin == Skin::Default || self.unlocked.contains(&skin)
    }

    pub(crate) fn add_points(&mut self, amount: u32) {
        self.points = self.points.saturating_add(amount);
    }

    /// Add `skin` to the owned skins without paying for it.  Returns `false`
    /// if it was already owned.
    pub(crate) fn unlock(&mut self, skin: Skin) -> bool {
        if self.owns(skin) {
            false
        } else {
            self.unlocked.push(skin);
            true
        }
    }

    /// Spend points on `skin`
    pub(crate) fn buy(&mut self, skin: Skin) -> Result<(), SkinError> {
        if self.owns(skin) {
            return Err(SkinError::AlreadyOwned(skin));
        }
        let price = skin.price();
        let Some(left) = self.points.checked_sub(price) else {
            return Err(SkinError::Unaffordable {
                skin,
                price,
                points: self.points,
            });
        };
        self.points = left;
        self.unlocked.push(skin);
        log::info!("Bought skin {skin} for {price} points");
        Ok(())
    }

    pub(crate) fn select(&mut self, skin: Skin) -> Result<(), SkinError> {
        if self.owns(skin) {
            self.current = skin;
            Ok(())
        } else {
            Err(SkinError::NotOwned(skin))
        }
    }

    /// Switch to the next owned skin, in catalogue order, wrapping around.
    /// Returns the newly-selected skin.
    pub(crate) fn cycle(&mut self) -> Skin {
        let mut skin = self.current;
        loop {
            skin = skin.next().unwrap_or_else(Skin::min);
            if self.owns(skin) {
                break;
            }
        }
        self.current = skin;
        skin
    }

    /// The least expensive skin not yet owned
    pub(crate) fn cheapest_locked(&self) -> Option<Skin> {
        Skin::iter()
            .filter(|&s| !self.owns(s))
            .min_by_key(|s| s.price())
    }
}

impl Default for SkinWallet {
    fn default() -> SkinWallet {
        SkinWallet::new()
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum SkinError {
    #[error("the {0} skin is already owned")]
    AlreadyOwned(Skin),
    #[error("the {skin} skin costs {price} points, but only {points} are available")]
    Unaffordable { skin: Skin, price: u32, points: u32 },
    #[error("the {0} skin has not been unlocked")]
    NotOwned(Skin),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(Skin::Default, 0)]
    #[case(Skin::Neon, 1000)]
    #[case(Skin::Pixel, 2000)]
    #[case(Skin::Rainbow, 5000)]
    #[case(Skin::Golden, 10000)]
    fn prices(#[case] skin: Skin, #[case] price: u32) {
        assert_eq!(skin.price(), price);
    }

    #[test]
    fn new_wallet() {
        let wallet = SkinWallet::new();
        assert_eq!(wallet.current(), Skin::Default);
        assert_eq!(wallet.points(), 0);
        assert!(wallet.owns(Skin::Default));
        assert!(!wallet.owns(Skin::Neon));
        assert_eq!(wallet.cheapest_locked(), Some(Skin::Neon));
    }

    #[test]
    fn buy_skin() {
        let mut wallet = SkinWallet::new();
        wallet.add_points(1500);
        assert_eq!(
            wallet.buy(Skin::Pixel),
            Err(SkinError::Unaffordable {
                skin: Skin::Pixel,
                price: 2000,
                points: 1500
            })
        );
        assert_eq!(wallet.buy(Skin::Neon), Ok(()));
        assert_eq!(wallet.points(), 500);
        assert!(wallet.owns(Skin::Neon));
        assert_eq!(wallet.buy(Skin::Neon), Err(SkinError::AlreadyOwned(Skin::Neon)));
        assert_eq!(wallet.points(), 500);
        assert_eq!(wallet.cheapest_locked(), Some(Skin::Pixel));
    }

    #[test]
    fn select_requires_ownership() {
        let mut wallet = SkinWallet::new();
        assert_eq!(wallet.select(Skin::Golden), Err(SkinError::NotOwned(Skin::Golden)));
        assert_eq!(wallet.current(), Skin::Default);
        assert!(wallet.unlock(Skin::Golden));
        assert!(!wallet.unlock(Skin::Golden));
        assert_eq!(wallet.select(Skin::Golden), Ok(()));
        assert_eq!(wallet.current(), Skin::Golden);
    }

    #[test]
    fn cycle_owned_skins() {
        let mut wallet = SkinWallet::new();
        assert_eq!(wallet.cycle(), Skin::Default);
        wallet.unlock(Skin::Rainbow);
        wallet.unlock(Skin::Neon);
        assert_eq!(wallet.cycle(), Skin::Neon);
        assert_eq!(wallet.cycle(), Skin::Rainbow);
        assert_eq!(wallet.cycle(), Skin::Default);
    }

    #[test]
    fn everything_owned() {
        let mut wallet = SkinWallet::new();
        for skin in Skin::iter() {
            wallet.unlock(skin);
        }
        assert_eq!(wallet.cheapest_locked(), None);
    }

    #[test]
    fn serialized_form() {
        let mut wallet = SkinWallet::new();
        wallet.add_points(1200);
        wallet.buy(Skin::Neon).unwrap();
        wallet.select(Skin::Neon).unwrap();
        assert_eq!(
            serde_json::to_value(&wallet).unwrap(),
            serde_json::json!({
                "current": "neon",
                "unlocked": ["default", "neon"],
                "points": 200,
            })
        );
    }

    #[test]
    fn rainbow_colors_cycle() {
        assert_eq!(
            Skin::Rainbow.segment_style(0),
            Skin::Rainbow.segment_style(6)
        );
        assert_ne!(
            Skin::Rainbow.segment_style(0),
            Skin::Rainbow.segment_style(1)
        );
    }
}
