//! Compile-time defaults shared by the view-model and the widgets.

/// Default proportion assigned to every token with price history.
pub const DEFAULT_PROPORTION_WEIGHT: f64 = 10.0;
pub const DEFAULT_PROPORTION_MIN: f64 = 1.0;
pub const DEFAULT_PROPORTION_MAX: f64 = 10.0;

/// Upper bound offered by the weight dialog.
pub const DIALOG_MAX_WEIGHT: f64 = 10.0;

pub const COMMISSION_MIN: f64 = 0.01;
pub const COMMISSION_MAX: f64 = 99.99;

pub const DATE_FORMAT_SHORT: &str = "%d %b %Y";
pub const WRONG_DATE_LABEL: &str = "wrong date";

/// Series colors, cycled by token position.
pub const TOKEN_COLORS: &[(u8, u8, u8)] = &[
    (0x00, 0x70, 0xf2),
    (0xe8, 0x5d, 0x04),
    (0x2b, 0x9a, 0x48),
    (0xc6, 0x28, 0x28),
    (0x7b, 0x1f, 0xa2),
    (0x00, 0x83, 0x8f),
    (0xf9, 0xa8, 0x25),
    (0x5d, 0x40, 0x37),
    (0x45, 0x5a, 0x64),
    (0xad, 0x14, 0x57),
];

pub fn token_color(position: usize) -> (u8, u8, u8) {
    TOKEN_COLORS[position % TOKEN_COLORS.len()]
}

/// Seed used by the setup page to generate demo price history.
#[derive(Debug, Clone)]
pub struct DemoTemplate {
    pub name: &'static str,
    pub tokens: &'static [(&'static str, &'static str, f64)],
    pub samples: usize,
    pub step_sec: i64,
    pub start_time: i64,
    pub amount: f64,
    pub volatility: f64,
}

pub const DEMO_TEMPLATES: &[DemoTemplate] = &[
    DemoTemplate {
        name: "Majors, daily",
        tokens: &[
            ("BTC", "Bitcoin", 6500.0),
            ("ETH", "Ethereum", 450.0),
            ("LTC", "Litecoin", 80.0),
        ],
        samples: 180,
        step_sec: 86_400,
        start_time: 1_514_764_800,
        amount: 10_000.0,
        volatility: 0.04,
    },
    DemoTemplate {
        name: "Altcoin basket, 4h",
        tokens: &[
            ("EOS", "EOS", 8.0),
            ("TRX", "TRON", 0.04),
            ("XLM", "Stellar", 0.3),
            ("ADA", "Cardano", 0.15),
            ("OMG", "OmiseGO", 9.0),
        ],
        samples: 240,
        step_sec: 14_400,
        start_time: 1_527_811_200,
        amount: 5_000.0,
        volatility: 0.06,
    },
];
