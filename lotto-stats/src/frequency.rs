use chrono::{Days, NaiveDate};
use lotto_db::models::{Draw, GameConfig};
use serde::{Serialize, Serializer};

use crate::{rank_counts, Analyzer, NumberCount};

/// Fenêtre d'une période : tout l'historique, un recul calendaire, ou les N derniers tirages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    AllHistory,
    Days(u64),
    Draws(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub id: &'static str,
    pub label: &'static str,
    pub window: Window,
}

pub const HOT_PERIOD: &str = "10draws";

pub const PERIODS: [Period; 8] = [
    Period { id: "all", label: "Since 2023", window: Window::AllHistory },
    Period { id: "2yr", label: "Recent 2 Years", window: Window::Days(730) },
    Period { id: "1yr", label: "Recent 1 Year", window: Window::Days(365) },
    Period { id: "6mo", label: "Recent 6 Months", window: Window::Days(180) },
    Period { id: "100draws", label: "Last 100 Draws", window: Window::Draws(100) },
    Period { id: "50draws", label: "Last 50 Draws", window: Window::Draws(50) },
    Period { id: HOT_PERIOD, label: "Last 10 Draws", window: Window::Draws(10) },
    Period { id: "5draws", label: "Last 5 Draws", window: Window::Draws(5) },
];

impl Period {
    pub fn select<'a>(&self, draws: &'a [Draw], today: NaiveDate) -> Vec<&'a Draw> {
        match self.window {
            Window::AllHistory => draws.iter().collect(),
            Window::Draws(n) => draws.iter().take(n).collect(),
            Window::Days(days) => {
                let cutoff = today.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN);
                draws.iter().filter(|d| d.date >= cutoff).collect()
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodFrequency {
    #[serde(skip)]
    pub id: &'static str,
    pub label: &'static str,
    pub total_draws: usize,
    pub data: Vec<NumberCount>,
    pub top10: Vec<NumberCount>,
    /// Les 10 moins fréquents, du plus rare au moins rare.
    pub bottom10: Vec<NumberCount>,
}

/// Résultats par période, sérialisés comme un objet dont les clés suivent l'ordre de `PERIODS`.
#[derive(Debug, Clone)]
pub struct FrequencyReport {
    pub periods: Vec<PeriodFrequency>,
}

impl FrequencyReport {
    pub fn get(&self, id: &str) -> Option<&PeriodFrequency> {
        self.periods.iter().find(|p| p.id == id)
    }
}

impl Serialize for FrequencyReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.periods.iter().map(|p| (p.id, p)))
    }
}

pub struct FrequencyAnalyzer {
    config: GameConfig,
    today: NaiveDate,
}

impl FrequencyAnalyzer {
    pub fn new(config: GameConfig, today: NaiveDate) -> Self {
        Self { config, today }
    }

    fn count(&self, subset: &[&Draw]) -> Vec<NumberCount> {
        let mut counts: Vec<NumberCount> = self
            .config
            .numbers()
            .map(|num| NumberCount { num, count: 0 })
            .collect();

        for draw in subset {
            for &n in &draw.numbers {
                if self.config.contains(n) {
                    counts[(n - self.config.min) as usize].count += 1;
                }
            }
        }

        rank_counts(counts)
    }

    fn period(&self, period: &Period, draws: &[Draw]) -> PeriodFrequency {
        let subset = period.select(draws, self.today);
        let data = self.count(&subset);
        let top10 = data.iter().take(10).copied().collect();
        let bottom10 = data[data.len().saturating_sub(10)..].iter().rev().copied().collect();

        PeriodFrequency {
            id: period.id,
            label: period.label,
            total_draws: subset.len(),
            data,
            top10,
            bottom10,
        }
    }
}

impl Analyzer for FrequencyAnalyzer {
    type Output = FrequencyReport;

    fn analyze(&self, draws: &[Draw]) -> FrequencyReport {
        FrequencyReport {
            periods: PERIODS.iter().map(|p| self.period(p, draws)).collect(),
        }
    }
}
