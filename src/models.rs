use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A token with the weight it carries inside a rebalance entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub name: String,
    pub weight: f64,
}

impl Token {
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }
}

/// Target allocation of one token in the base portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenProportion {
    pub name: String,
    pub weight: f64,
    pub min: f64,
    pub max: f64,
}

impl TokenProportion {
    pub fn new(name: impl Into<String>, weight: f64, min: f64, max: f64) -> Self {
        Self {
            name: name.into(),
            weight,
            min,
            max,
        }
    }
}

/// Scheduled reallocation at `index` of the date axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenWeight {
    pub tokens: Vec<Token>,
    pub timestamp: i64,
    pub index: usize,
}

impl TokenWeight {
    pub fn new(tokens: Vec<Token>, timestamp: i64, index: usize) -> Self {
        Self {
            tokens,
            timestamp,
            index,
        }
    }
}

/// One price sample. `time` is in unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPriceHistory {
    pub time: i64,
    pub value: f64,
}

pub type PriceHistory = BTreeMap<String, Vec<TokenPriceHistory>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenType {
    AutoRebalance,
    FixProportions,
    ManualRebalance,
}

impl TokenType {
    pub fn name(&self) -> &'static str {
        match self {
            TokenType::AutoRebalance => "Auto rebalance",
            TokenType::FixProportions => "Fix proportions",
            TokenType::ManualRebalance => "Manual rebalance",
        }
    }
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Pair of slider positions on the date axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    pub start: usize,
    pub end: usize,
}

impl DateRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Orders the ends and pulls both into `[0, max_index]`.
    pub fn clamped(self, max_index: usize) -> Self {
        let (low, high) = if self.start <= self.end {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        };
        Self {
            start: low.min(max_index),
            end: high.min(max_index),
        }
    }

    /// Moves the start thumb without letting it pass the end thumb.
    pub fn with_start(self, start: usize) -> Self {
        Self {
            start: start.min(self.end),
            end: self.end,
        }
    }

    /// Moves the end thumb without letting it pass the start thumb.
    pub fn with_end(self, end: usize) -> Self {
        Self {
            start: self.start,
            end: end.max(self.start),
        }
    }
}
