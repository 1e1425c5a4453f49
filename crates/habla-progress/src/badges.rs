use habla_core::BadgeConfig;
use std::collections::HashSet;

/// Built-in badge table, used when the config declares no `[[badge]]` entries.
pub fn default_badges() -> Vec<BadgeConfig> {
    [
        ("primera_palabra", "Primera Palabra", 1),
        ("cinco_palabras", "Cinco Palabras", 5),
        ("diez_palabras", "Diez Palabras", 10),
        ("veinte_palabras", "Veinte Palabras", 20),
        ("cincuenta_palabras", "Cincuenta Palabras", 50),
    ]
    .into_iter()
    .map(|(id, name, threshold)| BadgeConfig {
        id: id.to_string(),
        name: name.to_string(),
        threshold,
    })
    .collect()
}

/// Tracks correct-answer totals against the badge threshold table and hands
/// out each badge exactly once.
pub struct BadgeLedger {
    badges: Vec<BadgeConfig>,
    correct_total: u32,
    awarded: HashSet<String>,
}

impl BadgeLedger {
    /// An empty `badges` table falls back to [`default_badges`].
    pub fn new(badges: Vec<BadgeConfig>) -> Self {
        let mut badges = if badges.is_empty() {
            default_badges()
        } else {
            badges
        };
        badges.sort_by_key(|b| b.threshold);
        Self {
            badges,
            correct_total: 0,
            awarded: HashSet::new(),
        }
    }

    pub fn correct_total(&self) -> u32 {
        self.correct_total
    }

    /// Count one correct answer; returns badges newly crossed by the new total.
    pub fn record_correct(&mut self) -> Vec<BadgeConfig> {
        self.correct_total += 1;
        let total = self.correct_total;
        let mut earned = Vec::new();
        for badge in &self.badges {
            if badge.threshold <= total && !self.awarded.contains(&badge.id) {
                self.awarded.insert(badge.id.clone());
                earned.push(badge.clone());
            }
        }
        earned
    }

    /// Highest badge at or below `count`, if any.
    pub fn badge_for(&self, count: u32) -> Option<&BadgeConfig> {
        self.badges
            .iter()
            .filter(|b| b.threshold <= count)
            .last()
    }
}
