use std::fmt;
use std::str::FromStr;

use pinchzoom_core::geometry::{Point, Size};

/// Parse `WIDTHxHEIGHT`, e.g. `300x600`.
pub fn parse_size(s: &str) -> Result<Size, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let width = parse_number(w)?;
    let height = parse_number(h)?;
    Ok(Size::new(width, height))
}

fn parse_number(s: &str) -> Result<f32, String> {
    s.trim()
        .parse::<f32>()
        .map_err(|_| format!("invalid number '{s}'"))
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{s}'"))?;
    Ok(Point::new(parse_number(x)?, parse_number(y)?))
}

/// One step of a gesture script.
#[derive(Clone, Debug, PartialEq)]
pub enum Gesture {
    /// `pinch:FACTOR@X,Y`
    Pinch { factor: f32, focal: Point },
    /// `pan:DX,DY`, shifting the content offset
    Pan { delta: Point },
    /// `tap:X,Y` (double-tap)
    Tap { at: Point },
    /// `resize:WxH`
    Resize { size: Size },
    /// `scale:F`, zoom about the viewport center
    Scale { scale: f32 },
}

impl FromStr for Gesture {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, rest) = s
            .split_once(':')
            .ok_or_else(|| format!("expected KIND:ARGS, got '{s}'"))?;
        match kind.trim().to_ascii_lowercase().as_str() {
            "pinch" => {
                let (factor, focal) = rest
                    .split_once('@')
                    .ok_or_else(|| format!("expected pinch:FACTOR@X,Y, got '{s}'"))?;
                Ok(Self::Pinch {
                    factor: parse_number(factor)?,
                    focal: parse_point(focal)?,
                })
            }
            "pan" => Ok(Self::Pan {
                delta: parse_point(rest)?,
            }),
            "tap" => Ok(Self::Tap {
                at: parse_point(rest)?,
            }),
            "resize" => Ok(Self::Resize {
                size: parse_size(rest)?,
            }),
            "scale" => Ok(Self::Scale {
                scale: parse_number(rest)?,
            }),
            other => Err(format!("unknown gesture '{other}'")),
        }
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pinch { factor, focal } => write!(f, "pinch x{factor} @ {focal}"),
            Self::Pan { delta } => write!(f, "pan {delta}"),
            Self::Tap { at } => write!(f, "double-tap {at}"),
            Self::Resize { size } => write!(f, "resize {size}"),
            Self::Scale { scale } => write!(f, "scale {scale}"),
        }
    }
}
