use rand::seq::IndexedRandom;

pub const BADGE_COLORS: [&str; 5] = ["#FF5733", "#33FF57", "#3357FF", "#FF33A6", "#FF8333"];

/// The round initial shown in the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileBadge {
    pub initial: char,
    pub color: &'static str,
}

impl ProfileBadge {
    /// `None` when there is no email to take an initial from.
    pub fn for_email(email: &str) -> Option<Self> {
        let first = email.chars().next()?;
        let initial = first.to_uppercase().next().unwrap_or(first);
        let color = BADGE_COLORS
            .choose(&mut rand::rng())
            .copied()
            .unwrap_or(BADGE_COLORS[0]);
        Some(Self { initial, color })
    }

    /// `#RRGGBB` as an RGB triple.
    pub fn rgb(&self) -> (u8, u8, u8) {
        let hex = self.color.trim_start_matches('#');
        let channel = |i: usize| {
            hex.get(i..i + 2)
                .and_then(|c| u8::from_str_radix(c, 16).ok())
                .unwrap_or(0)
        };
        (channel(0), channel(2), channel(4))
    }
}
