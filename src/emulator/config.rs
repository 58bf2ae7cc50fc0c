use std::fmt;
use std::str::FromStr;

/// What happens to sprite pixels that land outside the 64x32 screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteEdges {
    /// Pixels wrap around to the opposite edge.
    Wrap,
    /// The origin wraps, pixels past the right or bottom edge are dropped.
    Clip,
    /// Any pixel outside the screen is a fatal error.
    Error,
}

impl Default for SpriteEdges {
    fn default() -> Self {
        SpriteEdges::Wrap
    }
}

impl FromStr for SpriteEdges {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "wrap" => Ok(SpriteEdges::Wrap),
            "clip" => Ok(SpriteEdges::Clip),
            "error" => Ok(SpriteEdges::Error),
            other => Err(format!("unknown sprite edge policy `{}`, expected wrap, clip or error", other)),
        }
    }
}

impl fmt::Display for SpriteEdges {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SpriteEdges::Wrap => "wrap",
            SpriteEdges::Clip => "clip",
            SpriteEdges::Error => "error",
        };
        f.write_str(name)
    }
}

/// Emulator configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub sprite_edges: SpriteEdges,
    /// Seed the built-in hexadecimal font at address 0.
    pub load_font: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            sprite_edges: SpriteEdges::default(),
            load_font: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("wrap" => Ok(SpriteEdges::Wrap))]
    #[test_case("Clip" => Ok(SpriteEdges::Clip))]
    #[test_case("ERROR" => Ok(SpriteEdges::Error))]
    fn parses_sprite_edges(s: &str) -> Result<SpriteEdges, String> {
        s.parse()
    }

    #[test]
    fn rejects_unknown_sprite_edges() {
        assert!("bounce".parse::<SpriteEdges>().is_err());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for edges in &[SpriteEdges::Wrap, SpriteEdges::Clip, SpriteEdges::Error] {
            assert_eq!(Ok(*edges), edges.to_string().parse());
        }
    }
}
