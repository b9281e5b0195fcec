use std::io::Read;

use anyhow::{Context, Result, bail};
use twenty48_core::engine::{MIN_SIZE, Tile};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Deserialize, clap::ValueEnum)]
pub enum PolicyKind {
    /// Uniformly random direction each turn
    #[default]
    Random,
    /// Left, Down, Right, Up in rotation, skipping rejected directions
    Cycle,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct Config {
    #[serde(default = "defaults::size")]
    pub size: usize,
    #[serde(default = "defaults::target")]
    pub target: Tile,

    // Autoplay-specific settings under one nested key.
    #[serde(default)]
    pub autoplay: Autoplay,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct Autoplay {
    #[serde(default = "defaults::games")]
    pub games: u32,
    /// Base seed; game `i` uses `seed + i`. None draws from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Stop a game after this many accepted moves even if it is not over.
    #[serde(default)]
    pub max_moves: Option<u64>,
    #[serde(default)]
    pub policy: PolicyKind,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            size: defaults::size(),
            target: defaults::target(),
            autoplay: Autoplay::default(),
        }
    }
}

impl Default for Autoplay {
    fn default() -> Self {
        Self {
            games: defaults::games(),
            seed: None,
            max_moves: None,
            policy: PolicyKind::default(),
        }
    }
}

impl Config {
    pub fn from_toml<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut file = std::fs::File::open(path)
            .with_context(|| format!("failed to open config {}", path.display()))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size < MIN_SIZE {
            bail!("size must be at least {MIN_SIZE}, got {}", self.size);
        }
        if self.target < 4 || !self.target.is_power_of_two() {
            bail!("target must be a power of two >= 4, got {}", self.target);
        }
        if self.autoplay.games == 0 {
            bail!("autoplay.games must be at least 1");
        }
        Ok(())
    }
}

mod defaults {
    use twenty48_core::engine::{DEFAULT_SIZE, DEFAULT_TARGET, Tile};

    pub fn size() -> usize {
        DEFAULT_SIZE
    }

    pub fn target() -> Tile {
        DEFAULT_TARGET
    }

    pub fn games() -> u32 {
        1
    }
}
