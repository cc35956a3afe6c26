//! Procedural brick layouts
//!
//! Layout generation is split in two: `plan` rolls every random decision for a
//! level into a `LayoutPlan`, and `build` turns a plan into positioned bricks.
//! Tests and level editors can hand `build` a plan directly.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::Brick;
use crate::settings::BreakoutConfig;

/// Colour/tier pair for one brick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    /// Colour (1-5)
    pub color: u8,
    /// Tier (0-3)
    pub tier: u8,
}

/// How a row is coloured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowColors {
    /// Every brick the same
    Solid(Style),
    /// Columns alternate between two styles, starting with `first`
    Alternating { first: Style, second: Style },
}

/// How bricks are placed in a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowPresence {
    /// Every column has a brick
    Full,
    /// Every other column has a brick; `skip_first` leaves column 0 empty
    Skip { skip_first: bool },
}

/// One row of a layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowPlan {
    pub colors: RowColors,
    pub presence: RowPresence,
}

/// Every random decision for a level's bricks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutPlan {
    /// Column count (always odd)
    pub columns: u32,
    pub rows: Vec<RowPlan>,
}

/// Highest tier reachable at a level
pub fn highest_tier(level: u32, config: &BreakoutConfig) -> u8 {
    (level / 5).min(config.tier_cap as u32) as u8
}

/// Highest colour reachable at a level
pub fn highest_color(level: u32, config: &BreakoutConfig) -> u8 {
    (level % 5 + 3).min(config.color_cap as u32).max(1) as u8
}

fn roll_style<R: Rng>(rng: &mut R, max_color: u8, max_tier: u8) -> Style {
    Style {
        color: rng.random_range(1..=max_color),
        tier: rng.random_range(0..=max_tier),
    }
}

/// Roll a layout for `level`
pub fn plan<R: Rng>(level: u32, config: &BreakoutConfig, rng: &mut R) -> LayoutPlan {
    let rows_max = config.rows_max.max(config.rows_min);
    let columns_max = config.columns_max.max(config.columns_min);
    let num_rows = rng.random_range(config.rows_min..=rows_max);
    let columns = rng.random_range(config.columns_min..=columns_max);
    let columns = if columns % 2 == 0 { columns + 1 } else { columns };

    let max_tier = highest_tier(level, config);
    let max_color = highest_color(level, config);

    let mut rows = Vec::with_capacity(num_rows as usize);
    for _ in 0..num_rows {
        let colors = if rng.random_bool(0.5) {
            RowColors::Alternating {
                first: roll_style(rng, max_color, max_tier),
                second: roll_style(rng, max_color, max_tier),
            }
        } else {
            RowColors::Solid(roll_style(rng, max_color, max_tier))
        };
        let presence = if rng.random_bool(0.5) {
            RowPresence::Skip {
                skip_first: rng.random_bool(0.5),
            }
        } else {
            RowPresence::Full
        };
        rows.push(RowPlan { colors, presence });
    }

    LayoutPlan { columns, rows }
}

/// Place the bricks of a plan, centring the grid horizontally
pub fn build(plan: &LayoutPlan, config: &BreakoutConfig) -> Vec<Brick> {
    let left = (config.width - plan.columns as f32 * config.brick_width) / 2.0;
    let mut bricks = Vec::new();

    for (row, row_plan) in plan.rows.iter().enumerate() {
        let y = config.brick_top + row as f32 * config.brick_height;

        for column in 0..plan.columns {
            let present = match row_plan.presence {
                RowPresence::Full => true,
                RowPresence::Skip { skip_first } => (column % 2 == 0) != skip_first,
            };
            if !present {
                continue;
            }

            let style = match row_plan.colors {
                RowColors::Solid(style) => style,
                RowColors::Alternating { first, second } => {
                    if column % 2 == 0 {
                        first
                    } else {
                        second
                    }
                }
            };

            bricks.push(Brick {
                x: left + column as f32 * config.brick_width,
                y,
                width: config.brick_width,
                height: config.brick_height,
                in_play: true,
                color: style.color,
                tier: style.tier,
            });
        }
    }

    bricks
}

/// Roll and build a level's bricks
pub fn generate<R: Rng>(level: u32, config: &BreakoutConfig, rng: &mut R) -> Vec<Brick> {
    let layout = plan(level, config, rng);
    let bricks = build(&layout, config);
    log::info!(
        "Level {}: {} rows x {} columns, {} bricks",
        level,
        layout.rows.len(),
        layout.columns,
        bricks.len()
    );
    bricks
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_single_solid_row() {
        let config = BreakoutConfig::default();
        let style = Style { color: 2, tier: 1 };
        let layout = LayoutPlan {
            columns: 7,
            rows: vec![RowPlan {
                colors: RowColors::Solid(style),
                presence: RowPresence::Full,
            }],
        };

        let bricks = build(&layout, &config);
        assert_eq!(bricks.len(), 7);
        assert!(bricks.iter().all(|b| b.in_play));
        assert!(bricks.iter().all(|b| b.sprite_index() == 5));
        // 7 columns of 32px centred in 432px
        assert_eq!(bricks[0].x, 104.0);
        assert_eq!(bricks[6].x + 32.0, 328.0);
    }

    #[test]
    fn test_skip_and_alternate() {
        let config = BreakoutConfig::default();
        let first = Style { color: 1, tier: 0 };
        let second = Style { color: 4, tier: 0 };
        let layout = LayoutPlan {
            columns: 9,
            rows: vec![
                RowPlan {
                    colors: RowColors::Alternating { first, second },
                    presence: RowPresence::Skip { skip_first: true },
                },
                RowPlan {
                    colors: RowColors::Alternating { first, second },
                    presence: RowPresence::Skip { skip_first: false },
                },
            ],
        };

        let bricks = build(&layout, &config);
        let (row0, row1): (Vec<_>, Vec<_>) = bricks.iter().partition(|b| b.y == 16.0);
        // Odd columns only: 1,3,5,7 all take the second style
        assert_eq!(row0.len(), 4);
        assert!(row0.iter().all(|b| b.color == 4));
        // Even columns 0..8: five bricks, first style
        assert_eq!(row1.len(), 5);
        assert!(row1.iter().all(|b| b.color == 1 && b.y == 32.0));
    }

    #[test]
    fn test_level_caps() {
        let config = BreakoutConfig::default();
        assert_eq!(highest_tier(1, &config), 0);
        assert_eq!(highest_tier(10, &config), 2);
        assert_eq!(highest_tier(40, &config), 3);
        assert_eq!(highest_color(1, &config), 4);
        assert_eq!(highest_color(2, &config), 5);
        assert_eq!(highest_color(5, &config), 3);
    }

    #[test]
    fn test_generate_is_seeded() {
        let config = BreakoutConfig::default();
        let a = generate(3, &config, &mut Pcg32::seed_from_u64(42));
        let b = generate(3, &config, &mut Pcg32::seed_from_u64(42));
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn prop_layout_odd_and_inside(level in 1u32..60, seed in any::<u64>()) {
            let config = BreakoutConfig::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let layout = plan(level, &config, &mut rng);

            prop_assert!(layout.columns % 2 == 1);
            prop_assert!((config.rows_min as usize..=config.rows_max as usize).contains(&layout.rows.len()));

            let max_tier = highest_tier(level, &config);
            let max_color = highest_color(level, &config);
            for brick in build(&layout, &config) {
                prop_assert!(brick.x >= 0.0);
                prop_assert!(brick.x + brick.width <= config.width);
                prop_assert!(brick.tier <= max_tier);
                prop_assert!((1..=max_color).contains(&brick.color));
                prop_assert!(brick.sprite_index() < 20);
            }
        }
    }
}
