use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Corner {
    TopLeft,
    TopRight,
    #[default]
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const CODES: [&'static str; 4] = ["TL", "TR", "BL", "BR"];

    pub fn code(self) -> &'static str {
        match self {
            Corner::TopLeft => "TL",
            Corner::TopRight => "TR",
            Corner::BottomLeft => "BL",
            Corner::BottomRight => "BR",
        }
    }
}

impl FromStr for Corner {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TL" => Ok(Corner::TopLeft),
            "TR" => Ok(Corner::TopRight),
            "BL" => Ok(Corner::BottomLeft),
            "BR" => Ok(Corner::BottomRight),
            other => Err(format!(
                "unknown position {:?}, expected one of {}",
                other,
                Corner::CODES.join(", ")
            )),
        }
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// Top-left of the pasted watermark; negative when it overhangs the target.
pub fn paste_offset(
    wm_width: u32,
    wm_height: u32,
    target_width: u32,
    target_height: u32,
    corner: Corner,
) -> (i64, i64) {
    let dx = i64::from(target_width) - i64::from(wm_width);
    let dy = i64::from(target_height) - i64::from(wm_height);

    match corner {
        Corner::TopLeft => (0, 0),
        Corner::TopRight => (dx, 0),
        Corner::BottomLeft => (0, dy),
        Corner::BottomRight => (dx, dy),
    }
}
