use anyhow::{Context, Result};
use clap::ValueEnum;
use sa_hooks::{HookSet, circle_hooks, rectangle_hooks};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Boundary {
    #[default]
    Circle,
    Rectangle,
}

/// Hook layout for a square working image of `size` pixels.
///
/// `offset` only shifts rectangle numbering; circles ignore it.
pub fn layout(boundary: Boundary, size: usize, hooks: usize, offset: usize) -> Result<HookSet> {
    match boundary {
        Boundary::Circle => {
            circle_hooks(size, size, hooks).context("placing hooks on the circle")
        }
        Boundary::Rectangle => {
            let (set, actual) = rectangle_hooks(size, size, hooks, offset)
                .context("placing hooks on the rectangle")?;
            if actual != hooks {
                log::info!("rectangle layout uses {actual} hooks ({hooks} requested)");
            }
            Ok(set)
        }
    }
}
